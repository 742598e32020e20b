// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, store client, and start HTTP server

mod config;
mod errors;
mod handlers;
mod models;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use errors::SpotsError;
use services::SupabaseClient;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        // We continue but log error, or we could panic
    }

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        // Use configured log level or default
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    log::info!("Starting spots-api service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );
    log::info!("Store endpoint: {}", config.supabase_url);

    // 4. Construct the shared anonymous store client (immutable after init)
    let store = SupabaseClient::from_config(&config);

    // 5. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let config_clone = config.clone();

    HttpServer::new(move || {
        App::new()
            // Application state (store client and config)
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(config_clone.clone()))
            // Framework deserialization failures keep the shared error shape
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                SpotsError::Validation(err.to_string()).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                SpotsError::Validation(err.to_string()).into()
            }))
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .service(
                web::scope("/api/v1")
                    .configure(handlers::health_config)
                    .configure(handlers::spots_config),
            )
    })
    .bind(&server_addr)?
    .run()
    .await
}
