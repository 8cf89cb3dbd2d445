//! Handlers for the `/users` resource.

use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::{self, NewUserDto, UpdateUserDto, UserDto};
use crate::handlers::ApiError;

use si_core::repositories::{
    BookingRepository, CommentRepository, ItemRepository, RequestRepository, UserRepository,
};
use si_core::services::UpdateUser;

/// Handler for GET /users
pub async fn list_users<U, I, Q, B, C>(
    state: web::Data<AppState<U, I, Q, B, C>>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    Q: RequestRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
{
    let users = state.user_service.find_all().await?;
    let users: Vec<UserDto> = users.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(users))
}

/// Handler for POST /users
pub async fn create_user<U, I, Q, B, C>(
    state: web::Data<AppState<U, I, Q, B, C>>,
    body: web::Json<NewUserDto>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    Q: RequestRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
{
    dto::check(&body.0)?;
    let user = state.user_service.create(body.0.name, body.0.email).await?;
    Ok(HttpResponse::Created().json(UserDto::from(user)))
}

/// Handler for GET /users/{id}
pub async fn get_user<U, I, Q, B, C>(
    state: web::Data<AppState<U, I, Q, B, C>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    Q: RequestRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
{
    let user = state.user_service.find_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserDto::from(user)))
}

/// Handler for PATCH /users/{id}
pub async fn update_user<U, I, Q, B, C>(
    state: web::Data<AppState<U, I, Q, B, C>>,
    path: web::Path<i64>,
    body: web::Json<UpdateUserDto>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    Q: RequestRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
{
    dto::check(&body.0)?;
    let patch = UpdateUser {
        name: body.0.name,
        email: body.0.email,
    };
    let user = state
        .user_service
        .update(path.into_inner(), patch)
        .await?;
    Ok(HttpResponse::Ok().json(UserDto::from(user)))
}

/// Handler for DELETE /users/{id}
pub async fn delete_user<U, I, Q, B, C>(
    state: web::Data<AppState<U, I, Q, B, C>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    Q: RequestRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
{
    state.user_service.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
