//! # authgate-core
//!
//! Session-based authentication and authorization gateway for Actix Web.
//!
//! The gateway is a single middleware that sequences, per request:
//! whitelist check, login-path authentication, authorization decision and
//! logout handling, routing every terminal outcome through a pluggable
//! handler set.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use actix_session::{storage::CookieSessionStore, SessionMiddleware};
//! use actix_web::{cookie::Key, App, HttpServer};
//! use authgate_core::http::security::{
//!     AnyOf, DelegatingAuthenticationManager, Gateway, HasRole,
//!     UsernamePasswordProvider,
//! };
//!
//! let users = UsernamePasswordProvider::new()
//!     .with_user("admin", "secret", &["ADMIN"]);
//!
//! let gateway = Gateway::new()
//!     .authentication_manager(DelegatingAuthenticationManager::new().provider(users))
//!     .permit_all(&["/public/**", "/health"])
//!     .route("/admin/**", HasRole::new("ADMIN"))
//!     .route("/db/**", AnyOf::of(vec![HasRole::arc("ADMIN"), HasRole::arc("DBA")]));
//!
//! App::new()
//!     .wrap(gateway)
//!     .wrap(SessionMiddleware::new(CookieSessionStore::default(), Key::generate()));
//! ```
//!
//! ## Modules
//!
//! - [`http::security`] - gateway middleware, authentication and authorization
//! - [`http::error`] - error types

pub mod http;
