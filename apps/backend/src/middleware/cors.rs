use actix_cors::Cors;
use actix_web::http::header;

use crate::config::server::ServerConfig;

const DEV_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

/// Build CORS middleware. Production serves same-origin clients only, so no
/// cross-origin allowance is granted there; development allows the usual
/// local dev servers, overridable via CORS_ALLOWED_ORIGINS.
pub fn cors_middleware(config: &ServerConfig) -> Cors {
    if config.production {
        return Cors::default();
    }

    // Comma-separated origins, lightly validated at the string level.
    let configured = std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default();
    let origins: Vec<String> = configured
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect();

    let effective: Vec<String> = if origins.is_empty() {
        DEV_ORIGINS.iter().map(|s| s.to_string()).collect()
    } else {
        origins
    };

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);
    for origin in effective {
        cors = cors.allowed_origin(&origin);
    }
    cors
}
