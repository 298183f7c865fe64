use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use anyhow::Context;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use errors::CustomError;
use lib_config::db::db::PgPool;
use serde_json::Value;
use tracing::instrument;
use uuid::Uuid;

use crate::db_error::DbError;
use crate::routes::announcements::model::{
    Announcement, CreateAnnouncementBody, NewAnnouncement, UpdateAnnouncementBody,
};
use crate::schema::announcements;

fn announcement_not_found() -> CustomError {
    CustomError::DatabaseError {
        msg: "No announcement row matched the requested id".to_string(),
        resp: "Announcement not found".to_string(),
        status_code: StatusCode::NOT_FOUND,
    }
}

/******************************************/
// Active announcement Route
/******************************************/
/**
 * @route   GET /api/announcements/active
 * @access  Public
 */
#[instrument(name = "Get active announcement", skip(pool))]
pub async fn get_active_announcement(
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, CustomError> {
    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let announcement = announcements::table
        .filter(announcements::active.eq(true))
        .order(announcements::created_at.desc())
        .select(Announcement::as_select())
        .first::<Announcement>(&mut conn)
        .await
        .optional()
        .map_err(DbError)?;

    // The banner slot is empty most of the time; the client expects an
    // explicit null rather than a 404 for that.
    match announcement {
        Some(a) => Ok(HttpResponse::Ok().json(a)),
        None => Ok(HttpResponse::Ok().json(Value::Null)),
    }
}

/******************************************/
// Create announcement Route
/******************************************/
/**
 * @route   POST /api/announcements
 * @access  Admin
 */
#[instrument(name = "Create announcement", skip(pool, body))]
pub async fn create_announcement(
    pool: web::Data<PgPool>,
    body: web::Json<CreateAnnouncementBody>,
) -> Result<HttpResponse, CustomError> {
    let body = body.into_inner();

    if body.message.trim().is_empty() {
        return Err(CustomError::ValidationError(
            "Announcement message must not be empty".to_string(),
        ));
    }

    let new_announcement = NewAnnouncement {
        id: Uuid::new_v4(),
        message: body.message,
        active: body.active.unwrap_or(true),
    };

    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let announcement = diesel::insert_into(announcements::table)
        .values(&new_announcement)
        .returning(Announcement::as_returning())
        .get_result::<Announcement>(&mut conn)
        .await
        .map_err(DbError)?;

    Ok(HttpResponse::Created().json(announcement))
}

/******************************************/
// Update announcement Route
/******************************************/
/**
 * @route   PATCH /api/announcements/{announcement_id}
 * @access  Admin
 */
#[instrument(name = "Update announcement", skip(pool, body))]
pub async fn update_announcement(
    pool: web::Data<PgPool>,
    announcement_id: web::Path<Uuid>,
    body: web::Json<UpdateAnnouncementBody>,
) -> Result<HttpResponse, CustomError> {
    let body = body.into_inner();
    if body.is_empty() {
        return Err(CustomError::ValidationError(
            "No fields provided to update".to_string(),
        ));
    }

    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let announcement = diesel::update(announcements::table.find(announcement_id.into_inner()))
        .set(&body)
        .returning(Announcement::as_returning())
        .get_result::<Announcement>(&mut conn)
        .await
        .optional()
        .map_err(DbError)?
        .ok_or_else(announcement_not_found)?;

    Ok(HttpResponse::Ok().json(announcement))
}
