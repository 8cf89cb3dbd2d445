//! # ShareIt Core
//!
//! Core business logic and domain layer for the ShareIt backend.
//! This crate contains domain entities, business services, repository
//! interfaces, and error types that form the foundation of the application
//! architecture. Persistence implementations live in `si_infra`; the HTTP
//! surface lives in `si_api`.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Booking, BookingStatus, Comment, Item, Request, StateFilter, User};
pub use domain::value_objects::{CommentDetails, ItemDetails};
pub use errors::{DomainError, DomainResult};
