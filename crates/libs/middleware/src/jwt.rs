use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage};
use actix_web_lab::middleware::Next;
use errors::{AuthError, CustomError};
use helpers::auth_jwt::auth::{verify_jwt, Claims};
use lib_config::config::configuration::Settings;

pub const ROLE_BASIC: &str = "basic";
pub const ROLE_GAMEADDER: &str = "gameadder";
pub const ROLE_ADMIN: &str = "admin";

/// Resolves the bearer token into [`Claims`] and stores them in the request
/// extensions. Missing or unverifiable tokens are a 401; role checks are a
/// separate middleware so the two failures stay distinct.
pub async fn jwt_auth_middleware(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let settings = req
        .app_data::<web::Data<Settings>>()
        .ok_or_else(|| {
            Error::from(CustomError::UnexpectedError(anyhow::anyhow!(
                "Settings missing from app data"
            )))
        })?
        .clone();

    let token = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    let token = match token {
        Some(token) => token.to_owned(),
        None => return Err(CustomError::AuthenticationError(AuthError::MissingToken).into()),
    };

    match verify_jwt(&token, &settings.jwt.secret) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.call(req).await
        }
        Err(err) => Err(CustomError::AuthenticationError(err).into()),
    }
}

// Roles are a flat enumeration; guarded routes list every permitted role
// instead of comparing ranks.
fn role_is_allowed(role: &str, allowed: &[&str]) -> bool {
    allowed.contains(&role)
}

fn check_role(
    req: &ServiceRequest,
    allowed: &[&str],
) -> Result<(), Error> {
    let role = req
        .extensions()
        .get::<Claims>()
        .map(|claims| claims.role.clone());

    match role {
        Some(role) if role_is_allowed(&role, allowed) => Ok(()),
        Some(_) => {
            Err(CustomError::AuthorizationError("Insufficient permissions".to_string()).into())
        }
        // Claims absent means the auth middleware never ran on this route.
        None => Err(CustomError::AuthenticationError(AuthError::MissingToken).into()),
    }
}

pub async fn require_admin(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    check_role(&req, &[ROLE_ADMIN])?;
    next.call(req).await
}

pub async fn require_game_adder(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    check_role(&req, &[ROLE_GAMEADDER, ROLE_ADMIN])?;
    next.call(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_does_not_satisfy_a_list_it_is_not_on() {
        assert!(!role_is_allowed(ROLE_ADMIN, &[ROLE_GAMEADDER]));
    }

    #[test]
    fn guarded_routes_enumerate_every_permitted_role() {
        assert!(role_is_allowed(ROLE_GAMEADDER, &[ROLE_GAMEADDER, ROLE_ADMIN]));
        assert!(role_is_allowed(ROLE_ADMIN, &[ROLE_GAMEADDER, ROLE_ADMIN]));
        assert!(!role_is_allowed(ROLE_BASIC, &[ROLE_GAMEADDER, ROLE_ADMIN]));
    }

    #[test]
    fn unknown_role_strings_never_pass() {
        assert!(!role_is_allowed("superadmin", &[ROLE_ADMIN]));
    }
}
