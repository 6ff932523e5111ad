use actix_web::{error, http::StatusCode, HttpResponse, HttpResponseBuilder};
use derive_more::{Display, Error};
use serde_json::json;

/// Failure taxonomy of the gateway pipeline.
///
/// Every variant is terminal for the current request and maps to exactly one
/// response status; nothing is retried.
#[derive(Debug, Display, Error)]
pub enum AuthError {
    /// Credential validation failed.
    #[display("invalid credentials")]
    InvalidCredentials,
    /// No registered authentication provider could process the attempt.
    /// Reported to clients exactly like invalid credentials.
    #[display("invalid credentials")]
    NoApplicableStrategy,
    /// The login payload could not be parsed into a credential pair.
    #[display("malformed credentials")]
    MalformedCredentials,
    /// A protected resource was requested without an authenticated principal.
    #[display("authentication required")]
    Unauthenticated,
    /// The authenticated principal lacks the required role.
    #[display("access denied")]
    Forbidden,
    /// Session invalidation failed during logout.
    #[display("logout failed")]
    LogoutFailure,
    /// The security context store rejected a read or write.
    #[display("security context error: {_0}")]
    ContextStore(#[error(not(source))] String),
}

impl error::ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match *self {
            AuthError::InvalidCredentials
            | AuthError::NoApplicableStrategy
            | AuthError::MalformedCredentials
            | AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::LogoutFailure | AuthError::ContextStore(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponseBuilder::new(self.status_code()).json(json!({
            "code": self.status_code().as_u16(),
            "message": self.to_string(),
        }))
    }
}
