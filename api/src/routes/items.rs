//! Handlers for the `/items` resource.

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;

use crate::app::AppState;
use crate::dto::{
    self, CommentDto, ItemDetailsDto, ItemDto, NewCommentDto, NewItemDto, UpdateItemDto,
};
use crate::handlers::ApiError;
use crate::identity::SharerUserId;

use si_core::repositories::{
    BookingRepository, CommentRepository, ItemRepository, RequestRepository, UserRepository,
};
use si_core::services::{NewItem, UpdateItem};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub text: String,
}

/// Handler for POST /items
pub async fn create_item<U, I, Q, B, C>(
    state: web::Data<AppState<U, I, Q, B, C>>,
    caller: SharerUserId,
    body: web::Json<NewItemDto>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    Q: RequestRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
{
    dto::check(&body.0)?;
    let new_item = NewItem {
        name: body.0.name,
        description: body.0.description,
        available: body.0.available,
        request_id: body.0.request_id,
    };
    let item = state.item_service.create(caller.0, new_item).await?;
    Ok(HttpResponse::Created().json(ItemDto::from(item)))
}

/// Handler for GET /items: the caller's own listings
pub async fn list_own_items<U, I, Q, B, C>(
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
    let items = state.item_service.find_by_owner(caller.0).await?;
    let items: Vec<ItemDto> = items.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(items))
}

/// Handler for GET /items/search?text=
pub async fn search_items<U, I, Q, B, C>(
    state: web::Data<AppState<U, I, Q, B, C>>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    Q: RequestRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
{
    let items = state.item_service.search(&query.text).await?;
    let items: Vec<ItemDto> = items.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(items))
}

/// Handler for GET /items/{id}
pub async fn get_item<U, I, Q, B, C>(
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
    let details = state.item_service.find_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ItemDetailsDto::from(details)))
}

/// Handler for PATCH /items/{id}
pub async fn update_item<U, I, Q, B, C>(
    state: web::Data<AppState<U, I, Q, B, C>>,
    caller: SharerUserId,
    path: web::Path<i64>,
    body: web::Json<UpdateItemDto>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    Q: RequestRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
{
    dto::check(&body.0)?;
    let patch = UpdateItem {
        name: body.0.name,
        description: body.0.description,
        available: body.0.available,
    };
    let item = state
        .item_service
        .update(caller.0, path.into_inner(), patch)
        .await?;
    Ok(HttpResponse::Ok().json(ItemDto::from(item)))
}

/// Handler for POST /items/{id}/comment
pub async fn add_comment<U, I, Q, B, C>(
    state: web::Data<AppState<U, I, Q, B, C>>,
    caller: SharerUserId,
    path: web::Path<i64>,
    body: web::Json<NewCommentDto>,
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
    let comment = state
        .item_service
        .add_comment(caller.0, path.into_inner(), body.0.text, now)
        .await?;
    Ok(HttpResponse::Created().json(CommentDto::from(comment)))
}
