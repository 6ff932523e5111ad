//! Error types shared by the gateway pipeline.

pub use auth_error::AuthError;

mod auth_error;
