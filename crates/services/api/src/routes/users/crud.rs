use actix_web::{web, HttpResponse};
use anyhow::Context;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use errors::CustomError;
use helpers::auth_jwt::auth::Claims;
use lib_config::db::db::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::db_error::DbError;
use crate::routes::auth::caller_id;
use crate::routes::users::model::{UpdateProfileBody, UpdateRoleBody, User, UserResponse};
use crate::schema::users;

/******************************************/
// List users Route
/******************************************/
/**
 * @route   GET /api/users
 * @access  Admin
 */
#[instrument(name = "Get all users", skip(pool))]
pub async fn get_users(pool: web::Data<PgPool>) -> Result<HttpResponse, CustomError> {
    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let rows = users::table
        .order(users::created_at.desc())
        .select(User::as_select())
        .load::<User>(&mut conn)
        .await
        .map_err(DbError)?;

    let response: Vec<UserResponse> = rows.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/******************************************/
// Update user role Route
/******************************************/
/**
 * @route   PATCH /api/users/{user_id}/role
 * @access  Admin
 */
#[instrument(name = "Update user role", skip(pool, body))]
pub async fn update_user_role(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
    body: web::Json<UpdateRoleBody>,
) -> Result<HttpResponse, CustomError> {
    let user_id = user_id.into_inner();
    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let updated = diesel::update(users::table.find(user_id))
        .set(users::role.eq(body.into_inner().role))
        .returning(User::as_returning())
        .get_result::<User>(&mut conn)
        .await
        .map_err(DbError)?;

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

/******************************************/
// Update own profile Route
/******************************************/
/**
 * @route   PATCH /api/users/{user_id}/profile
 * @access  JWT Protected (self only)
 */
#[instrument(name = "Update user profile", skip(pool, body, claims))]
pub async fn update_user_profile(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
    body: web::Json<UpdateProfileBody>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let user_id = user_id.into_inner();
    let caller = caller_id(&claims.into_inner())?;
    if caller != user_id {
        return Err(CustomError::AuthorizationError(
            "Cannot update other user's profile".to_string(),
        ));
    }

    let body = body.into_inner();
    if body.avatar.is_none() && body.bio.is_none() && body.theme.is_none() {
        return Err(CustomError::ValidationError(
            "No profile fields provided".to_string(),
        ));
    }

    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let updated = diesel::update(users::table.find(user_id))
        .set(&body)
        .returning(User::as_returning())
        .get_result::<User>(&mut conn)
        .await
        .map_err(DbError)?;

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}
