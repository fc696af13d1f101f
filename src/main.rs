use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use dotenv::dotenv;
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

mod config;
mod handlers;
mod models;
mod utils;

use crate::config::Config;
use crate::utils::codes::CodeStore;
use crate::utils::mailer::Mailer;

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    log::info!("connected to PostgreSQL");

    let mailer = web::Data::new(Mailer::from_config(&config)?);
    let codes = web::Data::new(CodeStore::new(
        Duration::from_secs(config.verification_ttl_secs),
        Duration::from_secs(config.resend_cooldown_secs),
    ));
    let db = web::Data::new(pool);
    let bind_addr = config.bind_addr.clone();
    let config = web::Data::new(config);

    log::info!("HTTP server listening on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(Cors::permissive())
            .app_data(db.clone())
            .app_data(codes.clone())
            .app_data(mailer.clone())
            .app_data(config.clone())
            .service(handlers::registration_handler::register_professional)
            .service(handlers::registration_handler::register_business)
            .service(handlers::unique_handler::check_unique)
            .service(handlers::verification_handler::send_code)
            .service(handlers::verification_handler::verify_code)
            .service(handlers::newsletter_handler::subscribe)
            .service(handlers::email_handler::send_email)
            .route("/health", web::get().to(health))
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}
