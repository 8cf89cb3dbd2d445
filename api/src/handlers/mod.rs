//! Error translation between the domain and HTTP.

mod error_handler;

pub use error_handler::ApiError;
