//! Repository interfaces for entity persistence.
//!
//! Each repository is an async trait implemented by the MySQL layer in
//! `si_infra` and by an in-memory mock used in tests. Mocks are exported
//! unconditionally so the api crate's integration tests can build a fully
//! wired application without a database.

pub mod booking;
pub mod comment;
pub mod item;
pub mod request;
pub mod user;

pub use booking::{BookingRepository, MockBookingRepository};
pub use comment::{CommentRepository, MockCommentRepository};
pub use item::{ItemRepository, MockItemRepository};
pub use request::{MockRequestRepository, RequestRepository};
pub use user::{MockUserRepository, UserRepository};
