use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use anyhow::Context;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use errors::CustomError;
use helpers::auth_jwt::auth::Claims;
use lib_config::db::db::PgPool;
use middleware::jwt::ROLE_ADMIN;
use tracing::instrument;
use uuid::Uuid;

use crate::db_error::DbError;
use crate::models::RequestStatus;
use crate::routes::auth::caller_id;
use crate::routes::requests::model::{
    CreateRequestBody, GameRequest, NewGameRequest, UpdateRequestStatusBody,
};
use crate::schema::requests;

fn request_not_found() -> CustomError {
    CustomError::DatabaseError {
        msg: "No request row matched the requested id".to_string(),
        resp: "Request not found".to_string(),
        status_code: StatusCode::NOT_FOUND,
    }
}

/******************************************/
// List requests Route
/******************************************/
/**
 * @route   GET /api/requests
 * @access  JWT Protected (own; admin sees all)
 */
#[instrument(name = "List game requests", skip(pool, claims))]
pub async fn list_requests(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let claims = claims.into_inner();
    let caller = caller_id(&claims)?;

    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let mut query = requests::table.into_boxed();
    if claims.role != ROLE_ADMIN {
        query = query.filter(requests::user_id.eq(caller));
    }

    let rows = query
        .order(requests::created_at.desc())
        .select(GameRequest::as_select())
        .load::<GameRequest>(&mut conn)
        .await
        .map_err(DbError)?;

    Ok(HttpResponse::Ok().json(rows))
}

/******************************************/
// Create request Route
/******************************************/
/**
 * @route   POST /api/requests
 * @access  JWT Protected
 */
#[instrument(name = "Create game request", skip(pool, body, claims), fields(game_name = %body.game_name))]
pub async fn create_request(
    pool: web::Data<PgPool>,
    body: web::Json<CreateRequestBody>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let user = caller_id(&claims.into_inner())?;
    let body = body.into_inner();

    if body.game_name.trim().is_empty() {
        return Err(CustomError::ValidationError(
            "Game name must not be empty".to_string(),
        ));
    }

    let new_request = NewGameRequest {
        id: Uuid::new_v4(),
        game_name: body.game_name,
        steam_id: body.steam_id,
        description: body.description,
        user_id: user,
        status: RequestStatus::Pending,
    };

    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let request = diesel::insert_into(requests::table)
        .values(&new_request)
        .returning(GameRequest::as_returning())
        .get_result::<GameRequest>(&mut conn)
        .await
        .map_err(DbError)?;

    Ok(HttpResponse::Created().json(request))
}

/******************************************/
// Update request status Route
/******************************************/
/**
 * @route   PATCH /api/requests/{request_id}
 * @access  Admin
 */
#[instrument(name = "Update request status", skip(pool, body))]
pub async fn update_request_status(
    pool: web::Data<PgPool>,
    request_id: web::Path<Uuid>,
    body: web::Json<UpdateRequestStatusBody>,
) -> Result<HttpResponse, CustomError> {
    let request_id = request_id.into_inner();
    let next = body.into_inner().status;

    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let current = requests::table
        .find(request_id)
        .select(requests::status)
        .first::<RequestStatus>(&mut conn)
        .await
        .optional()
        .map_err(DbError)?
        .ok_or_else(request_not_found)?;

    if !current.can_transition_to(next) {
        return Err(CustomError::ValidationError(format!(
            "Cannot change request status from {:?} to {:?}",
            current, next
        )));
    }

    // The update only lands if the status is still the one the transition was
    // checked against; a concurrent admin write turns this into a no-op.
    let updated = diesel::update(
        requests::table
            .find(request_id)
            .filter(requests::status.eq(current)),
    )
    .set(requests::status.eq(next))
    .returning(GameRequest::as_returning())
    .get_result::<GameRequest>(&mut conn)
    .await
    .optional()
    .map_err(DbError)?
    .ok_or(CustomError::DatabaseError {
        msg: "Request status changed between read and update".to_string(),
        resp: "Request status changed concurrently".to_string(),
        status_code: StatusCode::CONFLICT,
    })?;

    Ok(HttpResponse::Ok().json(updated))
}
