//! Routes guarded by the default authenticated-only policy.

use actix_web::{get, HttpResponse, Responder};

use authgate_core::http::security::{AuthenticatedPrincipal, OptionalPrincipal};

/// Home page - shows the current principal.
#[get("/")]
pub async fn index(principal: AuthenticatedPrincipal) -> impl Responder {
    HttpResponse::Ok().body(format!(
        "Welcome, {}!\nRoles: {:?}",
        principal.name(),
        principal.get_roles()
    ))
}

/// Profile page - never fails, falls back to a guest view.
#[get("/profile")]
pub async fn profile(principal: OptionalPrincipal) -> impl Responder {
    match principal.into_inner() {
        Some(p) => HttpResponse::Ok().body(format!("Profile for: {}", p.name())),
        None => HttpResponse::Ok().body("Guest profile - please login"),
    }
}
