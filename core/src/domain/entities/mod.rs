//! Business entities persisted by the repository layer.
//!
//! Entities reference each other through plain foreign-key identifiers; joins
//! are explicit queries issued on demand, never lazily loaded object graphs.

pub mod booking;
pub mod comment;
pub mod item;
pub mod request;
pub mod user;

pub use booking::{Booking, BookingStatus, StateFilter};
pub use comment::Comment;
pub use item::Item;
pub use request::Request;
pub use user::User;
