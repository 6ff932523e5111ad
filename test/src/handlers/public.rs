//! Whitelisted routes (no authentication required).

use actix_web::{get, HttpResponse, Responder};

#[get("/public/info")]
pub async fn info() -> impl Responder {
    HttpResponse::Ok().body("Public information")
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("OK")
}
