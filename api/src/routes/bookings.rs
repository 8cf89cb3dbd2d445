//! Handlers for the `/bookings` resource.
//!
//! Each listing handler captures `now` exactly once and threads it through
//! the service, so every booking in a single response is classified against
//! the same instant.

use std::str::FromStr;

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;

use crate::app::AppState;
use crate::dto::{BookingDto, NewBookingDto};
use crate::handlers::ApiError;
use crate::identity::SharerUserId;

use si_core::domain::entities::StateFilter;
use si_core::repositories::{
    BookingRepository, CommentRepository, ItemRepository, RequestRepository, UserRepository,
};

#[derive(Debug, Deserialize)]
pub struct StateQuery {
    pub state: Option<String>,
}

impl StateQuery {
    /// Parse the filter, defaulting to ALL when the parameter is absent
    fn filter(&self) -> Result<StateFilter, ApiError> {
        match &self.state {
            Some(state) => Ok(StateFilter::from_str(state)?),
            None => Ok(StateFilter::All),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApprovedQuery {
    pub approved: bool,
}

/// Handler for POST /bookings
pub async fn create_booking<U, I, Q, B, C>(
    state: web::Data<AppState<U, I, Q, B, C>>,
    caller: SharerUserId,
    body: web::Json<NewBookingDto>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    Q: RequestRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
{
    let now = Utc::now();
    body.0.validate_window(now)?;
    let booking = state
        .booking_service
        .create(caller.0, body.0.item_id, body.0.start, body.0.end)
        .await?;
    Ok(HttpResponse::Created().json(BookingDto::from(booking)))
}

/// Handler for GET /bookings?state=
pub async fn list_own_bookings<U, I, Q, B, C>(
    state: web::Data<AppState<U, I, Q, B, C>>,
    caller: SharerUserId,
    query: web::Query<StateQuery>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    Q: RequestRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
{
    let now = Utc::now();
    let bookings = state
        .booking_service
        .list_for_booker(caller.0, query.filter()?, now)
        .await?;
    let bookings: Vec<BookingDto> = bookings.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(bookings))
}

/// Handler for GET /bookings/owner?state=
pub async fn list_owner_bookings<U, I, Q, B, C>(
    state: web::Data<AppState<U, I, Q, B, C>>,
    caller: SharerUserId,
    query: web::Query<StateQuery>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    Q: RequestRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
{
    let now = Utc::now();
    let bookings = state
        .booking_service
        .list_for_owner(caller.0, query.filter()?, now)
        .await?;
    let bookings: Vec<BookingDto> = bookings.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(bookings))
}

/// Handler for GET /bookings/{id}
pub async fn get_booking<U, I, Q, B, C>(
    state: web::Data<AppState<U, I, Q, B, C>>,
    caller: SharerUserId,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    Q: RequestRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
{
    let booking = state
        .booking_service
        .find_by_id(caller.0, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(BookingDto::from(booking)))
}

/// Handler for PATCH /bookings/{id}?approved=
pub async fn decide_booking<U, I, Q, B, C>(
    state: web::Data<AppState<U, I, Q, B, C>>,
    caller: SharerUserId,
    path: web::Path<i64>,
    query: web::Query<ApprovedQuery>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    Q: RequestRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
{
    let booking = state
        .booking_service
        .decide(caller.0, path.into_inner(), query.approved)
        .await?;
    Ok(HttpResponse::Ok().json(BookingDto::from(booking)))
}

/// Handler for DELETE /bookings/{id}: booker withdraws a WAITING booking
pub async fn cancel_booking<U, I, Q, B, C>(
    state: web::Data<AppState<U, I, Q, B, C>>,
    caller: SharerUserId,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    Q: RequestRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
{
    let booking = state
        .booking_service
        .cancel(caller.0, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(BookingDto::from(booking)))
}
