//! MySQL implementations of the repository traits.

mod booking_repository_impl;
mod comment_repository_impl;
mod item_repository_impl;
mod request_repository_impl;
mod user_repository_impl;

pub use booking_repository_impl::MySqlBookingRepository;
pub use comment_repository_impl::MySqlCommentRepository;
pub use item_repository_impl::MySqlItemRepository;
pub use request_repository_impl::MySqlRequestRepository;
pub use user_repository_impl::MySqlUserRepository;
