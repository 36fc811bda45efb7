use actix_web::{get, web, HttpResponse, Responder};

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health);
}
