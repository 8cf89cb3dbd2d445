//! # Infrastructure Layer
//!
//! MySQL implementations of the `si_core` repository traits using SQLx,
//! plus connection-pool construction. The schema lives in `migrations/`.

pub mod database;

pub use database::connection::create_pool;
pub use database::mysql::{
    MySqlBookingRepository, MySqlCommentRepository, MySqlItemRepository,
    MySqlRequestRepository, MySqlUserRepository,
};
