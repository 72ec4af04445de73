pub mod auth;
pub mod request_metrics;
pub mod security_headers;

pub use auth::AuthMiddleware;
pub use request_metrics::RequestMetrics;
pub use security_headers::SecurityHeaders;

use actix_cors::Cors;
use actix_web::http::header;

/// Credentialed CORS for an exact list of origins
pub fn cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::CACHE_CONTROL,
            header::PRAGMA,
        ])
        .expose_headers(vec![header::CONTENT_TYPE])
        .supports_credentials()
        .max_age(3600)
}
