use actix_web::{web, HttpResponse};
use anyhow::Context;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use errors::CustomError;
use helpers::auth_jwt::auth::{create_jwt, Claims};
use helpers::passwords::hash_password;
use helpers::validations::validations::{LoginUserBody, RegisterUserBody};
use lib_config::config::configuration::Settings;
use lib_config::db::db::PgPool;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::db_error::DbError;
use crate::models::UserRole;
use crate::routes::auth::caller_id;
use crate::routes::auth::validate_user::validate_credentials;
use crate::routes::users::model::{NewUser, User, UserResponse};
use crate::schema::users;

/******************************************/
// Registering user Route
/******************************************/
/**
 * @route   POST /api/auth/register
 * @access  Public
 */
#[instrument(name = "Register a new user", skip(req_user, pool, settings), fields(username = %req_user.username, email = %req_user.email))]
pub async fn register_user(
    pool: web::Data<PgPool>,
    req_user: web::Json<RegisterUserBody>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, CustomError> {
    let user_data = req_user.into_inner();
    let (validated_name, validated_email) = user_data.validate()?;

    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    // Checked up front for a friendly message; the unique constraints still
    // back this up if two registrations race.
    let username_taken = users::table
        .filter(users::username.eq(validated_name.as_ref()))
        .select(users::id)
        .first::<Uuid>(&mut conn)
        .await
        .optional()
        .map_err(DbError)?
        .is_some();
    if username_taken {
        return Err(CustomError::ValidationError(
            "Username already exists".to_string(),
        ));
    }

    let email_taken = users::table
        .filter(users::email.eq(validated_email.as_ref()))
        .select(users::id)
        .first::<Uuid>(&mut conn)
        .await
        .optional()
        .map_err(DbError)?
        .is_some();
    if email_taken {
        return Err(CustomError::ValidationError(
            "Email already exists".to_string(),
        ));
    }

    let password_hashed = hash_password(&user_data.password)?;

    // Role is never taken from the request; every registration starts basic.
    let new_user = NewUser {
        id: Uuid::new_v4(),
        username: validated_name.as_ref().to_string(),
        email: validated_email.as_ref().to_string(),
        password_hash: password_hashed,
        role: UserRole::Basic,
    };

    let user = diesel::insert_into(users::table)
        .values(&new_user)
        .returning(User::as_returning())
        .get_result::<User>(&mut conn)
        .await
        .map_err(DbError)?;

    let token = create_jwt(
        &user.id.to_string(),
        &user.username,
        user.role.as_str(),
        &settings.jwt.secret,
    )?;

    Ok(HttpResponse::Ok().json(json!({
        "user": UserResponse::from(user),
        "token": token
    })))
}

/******************************************/
// Login Route
/******************************************/
/**
 * @route   POST /api/auth/login
 * @access  Public
 */
#[instrument(name = "Login a user", skip(req_login, pool, settings), fields(username = %req_login.username))]
pub async fn login_user(
    pool: web::Data<PgPool>,
    req_login: web::Json<LoginUserBody>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, CustomError> {
    let user = validate_credentials(&pool, &req_login.into_inner()).await?;

    let token = create_jwt(
        &user.id.to_string(),
        &user.username,
        user.role.as_str(),
        &settings.jwt.secret,
    )?;

    Ok(HttpResponse::Ok().json(json!({
        "user": UserResponse::from(user),
        "token": token
    })))
}

/******************************************/
// Who am I Route
/******************************************/
/**
 * @route   GET /api/auth/me
 * @access  JWT Protected
 */
#[instrument(name = "Get current user", skip(pool, claims))]
pub async fn me(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let user_id = caller_id(&claims.into_inner())?;
    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let user = users::table
        .find(user_id)
        .select(User::as_select())
        .first::<User>(&mut conn)
        .await
        .map_err(DbError)?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
