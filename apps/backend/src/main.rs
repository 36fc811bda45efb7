#![deny(clippy::wildcard_imports)]

use actix_web::{web, App, HttpServer};
use spades_backend::config::server::ServerConfig;
use spades_backend::middleware::cors::cors_middleware;
use spades_backend::routes;
use spades_backend::state::app_state::AppState;
use tracing::info;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = ServerConfig::from_env();
    info!(port = config.port, production = config.production, "starting spades server");

    let app_state = AppState::new();
    let worker_config = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&worker_config))
            .app_data(web::Data::new(app_state.clone()))
            .configure(routes::configure)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
