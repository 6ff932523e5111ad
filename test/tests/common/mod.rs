//! Common test utilities: gateway wiring, test app builder, session helpers.

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::Method;
use actix_web::{test, web, App, HttpResponse, Responder};

use authgate_core::http::security::{
    AnyOf, AuthenticatedPrincipal, DelegatingAuthenticationManager, Gateway, HasRole,
    UsernamePasswordProvider,
};

// =============================================================================
// Test Configuration
// =============================================================================

/// Test users:
/// - admin/admin-pass: ADMIN, USER
/// - alice/alice-pass: USER
/// - dba/dba-pass: DBA
pub fn test_manager() -> DelegatingAuthenticationManager {
    DelegatingAuthenticationManager::new().provider(
        UsernamePasswordProvider::new()
            .with_user("admin", "admin-pass", &["ADMIN", "USER"])
            .with_user("alice", "alice-pass", &["USER"])
            .with_user("dba", "dba-pass", &["DBA"]),
    )
}

/// Gateway under test:
/// - /public/** and /health whitelisted
/// - /admin/** requires ADMIN
/// - /db/** requires ADMIN or DBA
/// - everything else requires authentication
pub fn test_gateway() -> Gateway {
    Gateway::new()
        .authentication_manager(test_manager())
        .permit_all(&["/public/**", "/health"])
        .route("/admin/**", HasRole::new("ADMIN"))
        .route(
            "/db/**",
            AnyOf::of(vec![HasRole::arc("ADMIN"), HasRole::arc("DBA")]),
        )
}

// =============================================================================
// Test Handlers
// =============================================================================

pub async fn home(principal: AuthenticatedPrincipal) -> impl Responder {
    HttpResponse::Ok().body(format!("Welcome, {}!", principal.name()))
}

pub async fn admin_reports(principal: AuthenticatedPrincipal) -> impl Responder {
    HttpResponse::Ok().body(format!("Admin reports for {}", principal.name()))
}

pub async fn db_export(principal: AuthenticatedPrincipal) -> impl Responder {
    HttpResponse::Ok().body(format!("Database export started by {}", principal.name()))
}

pub async fn public_info() -> impl Responder {
    HttpResponse::Ok().body("Public information")
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

/// Cross-origin preflight responder.
pub async fn preflight() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

// =============================================================================
// Test App Builder
// =============================================================================

/// Creates a fully configured test application.
///
/// The session middleware uses a fixed key so cookies stay valid for the
/// lifetime of the test app.
pub async fn create_test_app() -> impl Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .service(
                web::scope("")
                    .wrap(test_gateway())
                    .service(web::resource("/home").route(web::get().to(home)))
                    .service(
                        web::resource("/admin/reports")
                            .route(web::get().to(admin_reports))
                            .route(web::method(Method::OPTIONS).to(preflight)),
                    )
                    .service(
                        web::resource("/db/export")
                            .route(web::get().to(db_export))
                            .route(web::method(Method::OPTIONS).to(preflight)),
                    )
                    .service(web::resource("/public/info").route(web::get().to(public_info)))
                    .service(web::resource("/health").route(web::get().to(health))),
            )
            .wrap(
                SessionMiddleware::builder(
                    CookieSessionStore::default(),
                    Key::from(&[0; 64]),
                )
                .cookie_secure(false)
                .build(),
            ),
    )
    .await
}

// =============================================================================
// Helpers
// =============================================================================

/// Performs a login request and returns the raw response.
pub async fn login<S>(app: &S, username: &str, password: &str) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({ "username": username, "password": password }))
        .to_request();
    test::call_service(app, req).await
}

/// Extracts the session cookie a response set, the way a browser jar would:
/// a removal cookie (empty value) clears the jar and yields `None`.
pub fn session_cookie(resp: &ServiceResponse) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "id" && !c.value().is_empty())
        .map(Cookie::into_owned)
}
