use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Error)]
pub enum CustomError {
    #[error("{0}")]
    ValidationError(String),

    #[error(transparent)]
    AuthenticationError(#[from] AuthError),

    #[error("{0}")]
    AuthorizationError(String),

    #[error("{resp}")]
    DatabaseError {
        msg: String,
        resp: String,
        status_code: StatusCode,
    },

    #[error("Internal server error")]
    UnexpectedError(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication required")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid credentials")]
    InvalidCredentials,
}

impl ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match self {
            CustomError::ValidationError(_) => StatusCode::BAD_REQUEST,
            CustomError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            CustomError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            CustomError::DatabaseError { status_code, .. } => *status_code,
            CustomError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Every error body carries the same `{"message": ...}` shape the
        // client renders in a toast.
        HttpResponse::build(self.status_code()).json(json!({ "message": self.to_string() }))
    }
}

impl Debug for CustomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let CustomError::DatabaseError { msg, .. } = self {
            writeln!(f, "{}", msg)?;
        }
        error_chain(self, f)
    }
}

fn error_chain(source: &impl Error, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    writeln!(f, "{}", source)?;

    if let Some(next) = source.source() {
        write!(f, "Caused by: \n\t{:?}", next)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_bad_requests() {
        let err = CustomError::ValidationError("rating must be between 1 and 10".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_token_is_unauthorized_but_wrong_role_is_forbidden() {
        let authn = CustomError::AuthenticationError(AuthError::MissingToken);
        let authz = CustomError::AuthorizationError("Insufficient permissions".into());
        assert_eq!(authn.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(authz.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn database_errors_surface_the_user_facing_message_only() {
        let err = CustomError::DatabaseError {
            msg: "duplicate key value violates unique constraint \"unique_username\"".into(),
            resp: "Username already exists".into(),
            status_code: StatusCode::BAD_REQUEST,
        };
        assert_eq!(err.to_string(), "Username already exists");
    }
}
