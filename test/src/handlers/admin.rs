//! Admin routes (ADMIN role required by the gateway).

use actix_web::{get, HttpResponse, Responder};

use authgate_core::http::security::AuthenticatedPrincipal;

#[get("/admin/reports")]
pub async fn reports(principal: AuthenticatedPrincipal) -> impl Responder {
    HttpResponse::Ok().body(format!("Admin reports for {}", principal.name()))
}

#[get("/admin/users")]
pub async fn users(principal: AuthenticatedPrincipal) -> impl Responder {
    HttpResponse::Ok().body(format!("User management, logged in as {}", principal.name()))
}
