//! Shared fixtures for the HTTP integration tests.
//!
//! Tests run the real route table and error mapping over the in-memory
//! repositories, so no database is needed.

use std::sync::Arc;

use actix_web::web;

use si_api::app::AppState;
use si_core::repositories::{
    MockBookingRepository, MockCommentRepository, MockItemRepository, MockRequestRepository,
    MockUserRepository,
};

pub type MockState = AppState<
    MockUserRepository,
    MockItemRepository,
    MockRequestRepository,
    MockBookingRepository,
    MockCommentRepository,
>;

pub fn mock_state() -> web::Data<MockState> {
    let users = Arc::new(MockUserRepository::new());
    let items = Arc::new(MockItemRepository::new());
    let requests = Arc::new(MockRequestRepository::new());
    let bookings = Arc::new(MockBookingRepository::new(Arc::clone(&items)));
    let comments = Arc::new(MockCommentRepository::new());

    web::Data::new(AppState::new(users, items, requests, bookings, comments))
}
