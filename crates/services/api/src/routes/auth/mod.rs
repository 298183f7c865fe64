pub mod crud;
pub mod validate_user;

use errors::{AuthError, CustomError};
use helpers::auth_jwt::auth::Claims;
use uuid::Uuid;

/// The subject claim is written by `create_jwt` from a real user id; a parse
/// failure means the token did not come from this service.
pub fn caller_id(claims: &Claims) -> Result<Uuid, CustomError> {
    Uuid::parse_str(&claims.sub)
        .map_err(|_| CustomError::AuthenticationError(AuthError::InvalidToken))
}
