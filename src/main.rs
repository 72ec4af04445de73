mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::database::{DocumentStore, MongoDB};
use crate::services::session_service::SessionManager;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    log::info!("🩸 Starting Blood Bank Service ({})...", config.environment);
    log::info!("📊 Database: {} @ {}", config.db_name, config.database_host());

    let db = MongoDB::connect(&config.mongo_uri(), &config.db_name)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    // A failed ping is reported but the listener still starts
    match db.ping().await {
        Ok(()) => log::info!("✅ Pinged your deployment. You successfully connected to MongoDB!"),
        Err(e) => log::error!("❌ MongoDB ping failed: {}", e),
    }

    let store: Arc<dyn DocumentStore> = Arc::new(db);
    let store_data: web::Data<dyn DocumentStore> = web::Data::from(store);
    let sessions = web::Data::new(SessionManager::new(&config.token_secret, config.is_production()));
    let allowed_origins = config.allowed_origins.clone();

    log::info!("🌐 Blood bank is running on port {}", config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    HttpServer::new(move || {
        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .app_data(sessions.clone())
            .app_data(api::json_config())
            .wrap(middleware::cors(&allowed_origins))
            .wrap(middleware::SecurityHeaders)
            .wrap(middleware::RequestMetrics)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
