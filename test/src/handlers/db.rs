//! Database routes (ADMIN or DBA role required by the gateway).

use actix_web::{get, HttpResponse, Responder};

use authgate_core::http::security::AuthenticatedPrincipal;

#[get("/db/export")]
pub async fn export(principal: AuthenticatedPrincipal) -> impl Responder {
    HttpResponse::Ok().body(format!("Database export started by {}", principal.name()))
}

#[get("/db/status")]
pub async fn status(principal: AuthenticatedPrincipal) -> impl Responder {
    HttpResponse::Ok().body(format!("Database status for {}", principal.name()))
}
