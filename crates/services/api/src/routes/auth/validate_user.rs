use anyhow::Context;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use errors::{AuthError, CustomError};
use helpers::passwords::verify_password;
use helpers::validations::validations::LoginUserBody;
use lib_config::db::db::PgPool;
use tracing::instrument;
use utils::telemetry::spawn_blocking_with_tracing;

use crate::db_error::DbError;
use crate::routes::users::model::User;
use crate::schema::users;

// Unknown username and wrong password fail identically; the response never
// reveals which one it was.
#[instrument(name = "Validate credentials", skip(req_login, pool), fields(username = %req_login.username))]
pub async fn validate_credentials(
    pool: &PgPool,
    req_login: &LoginUserBody,
) -> Result<User, CustomError> {
    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let user = users::table
        .filter(users::username.eq(&req_login.username))
        .select(User::as_select())
        .first::<User>(&mut conn)
        .await
        .optional()
        .map_err(DbError)?
        .ok_or(CustomError::AuthenticationError(
            AuthError::InvalidCredentials,
        ))?;

    let expected_hash = user.password_hash.clone();
    let candidate = req_login.password.clone();
    let is_valid =
        spawn_blocking_with_tracing(move || verify_password(&expected_hash, &candidate))
            .await
            .context("Failed to join password verification task")?;

    if is_valid {
        Ok(user)
    } else {
        Err(CustomError::AuthenticationError(
            AuthError::InvalidCredentials,
        ))
    }
}
