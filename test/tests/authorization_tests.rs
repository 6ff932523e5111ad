//! Authorization tests: whitelist, role-guarded path families, OPTIONS
//! bypass and the default policy.

mod common;

use actix_web::http::{Method, StatusCode};
use actix_web::test;

use common::{create_test_app, login, session_cookie};

// =============================================================================
// Whitelist Tests
// =============================================================================

#[actix_web::test]
async fn test_whitelisted_paths_are_reachable_anonymously() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/public/info").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_whitelisted_paths_ignore_the_principal() {
    let app = create_test_app().await;

    let resp = login(&app, "alice", "alice-pass").await;
    let cookie = session_cookie(&resp).unwrap();

    let req = test::TestRequest::get()
        .uri("/public/info")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// =============================================================================
// /admin/** Tests
// =============================================================================

#[actix_web::test]
async fn test_admin_route_with_admin_role() {
    let app = create_test_app().await;

    let resp = login(&app, "admin", "admin-pass").await;
    let cookie = session_cookie(&resp).unwrap();

    let req = test::TestRequest::get()
        .uri("/admin/reports")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("admin"));
}

#[actix_web::test]
async fn test_admin_route_without_admin_role_is_forbidden() {
    let app = create_test_app().await;

    let resp = login(&app, "alice", "alice-pass").await;
    let cookie = session_cookie(&resp).unwrap();

    // authenticated but unauthorized: access-denied, not entry-point
    let req = test::TestRequest::get()
        .uri("/admin/reports")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_admin_route_anonymous_is_challenged() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/admin/reports").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// /db/** Tests (ADMIN or DBA)
// =============================================================================

#[actix_web::test]
async fn test_db_route_with_admin_role() {
    let app = create_test_app().await;

    let resp = login(&app, "admin", "admin-pass").await;
    let cookie = session_cookie(&resp).unwrap();

    let req = test::TestRequest::get()
        .uri("/db/export")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_db_route_with_dba_role() {
    let app = create_test_app().await;

    let resp = login(&app, "dba", "dba-pass").await;
    let cookie = session_cookie(&resp).unwrap();

    let req = test::TestRequest::get()
        .uri("/db/export")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_db_route_with_neither_role_is_forbidden() {
    let app = create_test_app().await;

    let resp = login(&app, "alice", "alice-pass").await;
    let cookie = session_cookie(&resp).unwrap();

    let req = test::TestRequest::get()
        .uri("/db/export")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_db_route_anonymous_is_challenged() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/db/export").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_dba_role_does_not_open_admin_routes() {
    let app = create_test_app().await;

    let resp = login(&app, "dba", "dba-pass").await;
    let cookie = session_cookie(&resp).unwrap();

    // a DBA is not an ADMIN
    let req = test::TestRequest::get()
        .uri("/admin/reports")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// =============================================================================
// OPTIONS Bypass Tests
// =============================================================================

#[actix_web::test]
async fn test_options_requests_pass_without_credentials() {
    let app = create_test_app().await;

    let req = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/admin/reports")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/db/export")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

// =============================================================================
// Default Policy Tests
// =============================================================================

#[actix_web::test]
async fn test_unmatched_path_requires_authentication() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/home").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = login(&app, "alice", "alice-pass").await;
    let cookie = session_cookie(&resp).unwrap();

    let req = test::TestRequest::get()
        .uri("/home")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
