//! Handlers for the `/requests` resource.

use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::app::AppState;
use crate::dto::{self, NewRequestDto, RequestDto};
use crate::handlers::ApiError;
use crate::identity::SharerUserId;

use si_core::repositories::{
    BookingRepository, CommentRepository, ItemRepository, RequestRepository, UserRepository,
};

/// Handler for POST /requests
pub async fn create_request<U, I, Q, B, C>(
    state: web::Data<AppState<U, I, Q, B, C>>,
    caller: SharerUserId,
    body: web::Json<NewRequestDto>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    Q: RequestRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
{
    dto::check(&body.0)?;
    let now = Utc::now();
    let request = state
        .request_service
        .create(caller.0, body.0.description, now)
        .await?;
    Ok(HttpResponse::Created().json(RequestDto::from(request)))
}

/// Handler for GET /requests: the caller's own requests, newest first
pub async fn list_own_requests<U, I, Q, B, C>(
    state: web::Data<AppState<U, I, Q, B, C>>,
    caller: SharerUserId,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    Q: RequestRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
{
    let requests = state.request_service.find_own(caller.0).await?;
    let requests: Vec<RequestDto> = requests.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(requests))
}

/// Handler for GET /requests/{id}
pub async fn get_request<U, I, Q, B, C>(
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
    let request = state
        .request_service
        .find_by_id(caller.0, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(RequestDto::from(request)))
}
