use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Every way a platform command can be rejected.
///
/// Failures are raised before any mutation happens, so a rejected command
/// never leaves partial state behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

impl PlatformError {
    /// Short machine-friendly name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PlatformError::Conflict(_) => "conflict",
            PlatformError::InvalidCredentials => "invalid_credentials",
            PlatformError::NotFound(_) => "not_found",
            PlatformError::PermissionDenied(_) => "permission_denied",
        }
    }

    pub fn user_not_found(username: &str) -> Self {
        PlatformError::NotFound(format!("User {} not found", username))
    }

    pub fn post_not_found(post_id: &str) -> Self {
        PlatformError::NotFound(format!("Post {} not found", post_id))
    }
}

pub type PlatformResult<T> = Result<T, PlatformError>;

impl ResponseError for PlatformError {
    fn status_code(&self) -> StatusCode {
        match self {
            PlatformError::Conflict(_) => StatusCode::CONFLICT,
            PlatformError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            PlatformError::NotFound(_) => StatusCode::NOT_FOUND,
            PlatformError::PermissionDenied(_) => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let msg = match self {
            PlatformError::Conflict(msg)
            | PlatformError::NotFound(msg)
            | PlatformError::PermissionDenied(msg) => msg.clone(),
            PlatformError::InvalidCredentials => "Invalid credentials".to_string(),
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": msg }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_status_codes() {
        assert_eq!(PlatformError::Conflict("x".into()).status_code(), 409);
        assert_eq!(PlatformError::InvalidCredentials.status_code(), 401);
        assert_eq!(PlatformError::user_not_found("bob").status_code(), 404);
        assert_eq!(PlatformError::PermissionDenied("x".into()).status_code(), 403);
    }

    #[test]
    fn display_keeps_the_message() {
        let err = PlatformError::post_not_found("p1");
        assert_eq!(err.to_string(), "Not Found: Post p1 not found");
        assert_eq!(err.kind(), "not_found");
    }
}
