use anyhow::Context;
use chrono::{Duration, Utc};
use errors::{AuthError, CustomError};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Tokens stay valid for a fixed window; there is no refresh flow.
pub const TOKEN_VALIDITY_DAYS: i64 = 7;

const ISSUER: &str = "auth";

/// Identity payload embedded in every bearer token. `sub` is the user id,
/// `role` the role string as stored on the user row.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub role: String,
    pub iss: String,
    pub iat: usize,
    pub exp: usize,
}

/******************************************/
// Creating JWT token
/******************************************/
pub fn create_jwt(
    user_id: &str,
    username: &str,
    role: &str,
    secret: &str,
) -> Result<String, CustomError> {
    let issued_at = Utc::now().timestamp() as usize;
    let expiration_time = (Utc::now() + Duration::days(TOKEN_VALIDITY_DAYS)).timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        role: role.to_string(),
        iss: ISSUER.to_string(),
        iat: issued_at,
        exp: expiration_time,
    };

    let encoding_key = EncodingKey::from_secret(secret.as_ref());
    let token = encode(&Header::default(), &claims, &encoding_key)
        .context("Failed to sign JWT claims")?;

    Ok(token)
}

/******************************************/
// Verifying JWT token
/******************************************/
// Malformed, expired and tampered tokens all collapse into the same
// `InvalidToken` error; the caller never learns which check failed.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let decoding_key = DecodingKey::from_secret(secret.as_ref());
    let mut validation = Validation::default();
    validation.set_issuer(&[ISSUER]);
    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|_| AuthError::InvalidToken)?;

    let claims = token_data.claims;
    // Not covered by `Validation`: tokens postdated past the current clock.
    if claims.iat > Utc::now().timestamp() as usize {
        return Err(AuthError::InvalidToken);
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok};

    const SECRET: &str = "test-secret";

    fn encode_raw(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap()
    }

    #[test]
    fn issued_token_round_trips_to_identical_claims() {
        let token = create_jwt("user-1", "alice", "basic", SECRET).unwrap();
        let claims = verify_jwt(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, "basic");
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "user-1".into(),
            username: "alice".into(),
            role: "basic".into(),
            iss: ISSUER.into(),
            iat: now - 8 * 24 * 3600,
            exp: now - 24 * 3600,
        };
        assert_err!(verify_jwt(&encode_raw(&claims, SECRET), SECRET));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = create_jwt("user-1", "alice", "basic", "other-secret").unwrap();
        assert_err!(verify_jwt(&token, SECRET));
    }

    #[test]
    fn token_with_foreign_issuer_is_rejected() {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "user-1".into(),
            username: "alice".into(),
            role: "basic".into(),
            iss: "somewhere-else".into(),
            iat: now,
            exp: now + 3600,
        };
        assert_err!(verify_jwt(&encode_raw(&claims, SECRET), SECRET));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert_err!(verify_jwt("not-a-jwt", SECRET));
        assert_ok!(verify_jwt(
            &create_jwt("user-1", "alice", "admin", SECRET).unwrap(),
            SECRET
        ));
    }
}
