use actix_web::web;

use crate::ws::session;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(crate::health::configure_routes)
        .route("/ws", web::get().to(session::upgrade));
}
