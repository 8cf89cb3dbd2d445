use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use log::info;

use si_api::app::{create_app, AppState};
use si_infra::{
    create_pool, MySqlBookingRepository, MySqlCommentRepository, MySqlItemRepository,
    MySqlRequestRepository, MySqlUserRepository,
};
use si_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    let bind_address = config.server.bind_address();
    info!("Starting ShareIt API server on {}", bind_address);

    let pool = create_pool(&config.database).await?;

    let users = Arc::new(MySqlUserRepository::new(pool.clone()));
    let items = Arc::new(MySqlItemRepository::new(pool.clone()));
    let requests = Arc::new(MySqlRequestRepository::new(pool.clone()));
    let bookings = Arc::new(MySqlBookingRepository::new(pool.clone()));
    let comments = Arc::new(MySqlCommentRepository::new(pool));

    let app_state = web::Data::new(AppState::new(users, items, requests, bookings, comments));

    let workers = config.server.workers;
    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if workers > 0 {
        server = server.workers(workers);
    }

    server.bind(&bind_address)?.run().await?;
    Ok(())
}
