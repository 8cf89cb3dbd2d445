//! Application state and factory.
//!
//! `create_app` wires the route table over any set of repository
//! implementations, so the integration tests run the exact same routing
//! and error mapping against in-memory repositories.

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse};

use crate::middleware::cors::create_cors;
use crate::routes::{bookings, items, requests, users};

use si_core::repositories::{
    BookingRepository, CommentRepository, ItemRepository, RequestRepository, UserRepository,
};
use si_core::services::{BookingService, ItemService, RequestService, UserService};
use si_shared::types::ErrorBody;

/// Shared services handed to every handler
pub struct AppState<U, I, Q, B, C>
where
    U: UserRepository,
    I: ItemRepository,
    Q: RequestRepository,
    B: BookingRepository,
    C: CommentRepository,
{
    pub user_service: Arc<UserService<U>>,
    pub item_service: Arc<ItemService<I, U, B, C, Q>>,
    pub request_service: Arc<RequestService<Q, U>>,
    pub booking_service: Arc<BookingService<B, I, U>>,
}

impl<U, I, Q, B, C> AppState<U, I, Q, B, C>
where
    U: UserRepository,
    I: ItemRepository,
    Q: RequestRepository,
    B: BookingRepository,
    C: CommentRepository,
{
    /// Build the full service graph over one set of repositories
    pub fn new(
        users: Arc<U>,
        items: Arc<I>,
        requests: Arc<Q>,
        bookings: Arc<B>,
        comments: Arc<C>,
    ) -> Self {
        Self {
            user_service: Arc::new(UserService::new(Arc::clone(&users))),
            item_service: Arc::new(ItemService::new(
                Arc::clone(&items),
                Arc::clone(&users),
                Arc::clone(&bookings),
                comments,
                Arc::clone(&requests),
            )),
            request_service: Arc::new(RequestService::new(requests, Arc::clone(&users))),
            booking_service: Arc::new(BookingService::new(bookings, items, users)),
        }
    }
}

/// Create and configure the application with all routes
pub fn create_app<U, I, Q, B, C>(
    app_state: web::Data<AppState<U, I, Q, B, C>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    Q: RequestRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
{
    let cors = create_cors();

    App::new()
        .app_data(app_state)
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // User directory
        .service(
            web::scope("/users")
                .route("", web::get().to(users::list_users::<U, I, Q, B, C>))
                .route("", web::post().to(users::create_user::<U, I, Q, B, C>))
                .route("/{id}", web::get().to(users::get_user::<U, I, Q, B, C>))
                .route("/{id}", web::patch().to(users::update_user::<U, I, Q, B, C>))
                .route(
                    "/{id}",
                    web::delete().to(users::delete_user::<U, I, Q, B, C>),
                ),
        )
        // Item catalog
        .service(
            web::scope("/items")
                .route("", web::get().to(items::list_own_items::<U, I, Q, B, C>))
                .route("", web::post().to(items::create_item::<U, I, Q, B, C>))
                .route("/search", web::get().to(items::search_items::<U, I, Q, B, C>))
                .route("/{id}", web::get().to(items::get_item::<U, I, Q, B, C>))
                .route("/{id}", web::patch().to(items::update_item::<U, I, Q, B, C>))
                .route(
                    "/{id}/comment",
                    web::post().to(items::add_comment::<U, I, Q, B, C>),
                ),
        )
        // Booking lifecycle
        .service(
            web::scope("/bookings")
                .route(
                    "",
                    web::get().to(bookings::list_own_bookings::<U, I, Q, B, C>),
                )
                .route("", web::post().to(bookings::create_booking::<U, I, Q, B, C>))
                .route(
                    "/owner",
                    web::get().to(bookings::list_owner_bookings::<U, I, Q, B, C>),
                )
                .route("/{id}", web::get().to(bookings::get_booking::<U, I, Q, B, C>))
                .route(
                    "/{id}",
                    web::patch().to(bookings::decide_booking::<U, I, Q, B, C>),
                )
                .route(
                    "/{id}",
                    web::delete().to(bookings::cancel_booking::<U, I, Q, B, C>),
                ),
        )
        // Request board
        .service(
            web::scope("/requests")
                .route(
                    "",
                    web::get().to(requests::list_own_requests::<U, I, Q, B, C>),
                )
                .route(
                    "",
                    web::post().to(requests::create_request::<U, I, Q, B, C>),
                )
                .route("/{id}", web::get().to(requests::get_request::<U, I, Q, B, C>)),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "shareit-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new(
        "Not found",
        "The requested resource was not found",
    ))
}
