use actix_web::{web, HttpResponse};
use anyhow::Context;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use errors::CustomError;
use helpers::auth_jwt::auth::Claims;
use lib_config::db::db::PgPool;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::db_error::DbError;
use crate::routes::auth::caller_id;
use crate::routes::favorites::model::{Favorite, NewFavorite, ToggleFavoriteBody};
use crate::schema::favorites;

/******************************************/
// List favorites Route
/******************************************/
/**
 * @route   GET /api/favorites/{user_id}
 * @access  JWT Protected (self only)
 */
#[instrument(name = "List favorites", skip(pool, claims))]
pub async fn list_favorites(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let caller = caller_id(&claims.into_inner())?;
    let user_id = user_id.into_inner();

    if user_id != caller {
        return Err(CustomError::AuthorizationError(
            "Cannot view another user's favorites".to_string(),
        ));
    }

    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let rows = favorites::table
        .filter(favorites::user_id.eq(user_id))
        .order(favorites::created_at.desc())
        .select(Favorite::as_select())
        .load::<Favorite>(&mut conn)
        .await
        .map_err(DbError)?;

    Ok(HttpResponse::Ok().json(rows))
}

/******************************************/
// Toggle favorite Route
/******************************************/
/**
 * @route   POST /api/favorites
 * @access  JWT Protected
 */
// Delete first and let the row count decide; the unique (user_id, game_id)
// constraint keeps concurrent toggles from ever stacking duplicates.
#[instrument(name = "Toggle favorite", skip(pool, claims, body), fields(game_id = %body.game_id))]
pub async fn toggle_favorite(
    pool: web::Data<PgPool>,
    body: web::Json<ToggleFavoriteBody>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let user = caller_id(&claims.into_inner())?;
    let game_id = body.into_inner().game_id;

    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let deleted = diesel::delete(
        favorites::table.filter(
            favorites::user_id
                .eq(user)
                .and(favorites::game_id.eq(game_id)),
        ),
    )
    .execute(&mut conn)
    .await
    .map_err(DbError)?;

    if deleted > 0 {
        return Ok(HttpResponse::Ok().json(json!({ "favorited": false })));
    }

    let new_favorite = NewFavorite {
        id: Uuid::new_v4(),
        user_id: user,
        game_id,
    };
    diesel::insert_into(favorites::table)
        .values(&new_favorite)
        .execute(&mut conn)
        .await
        .map_err(DbError)?;

    Ok(HttpResponse::Ok().json(json!({ "favorited": true })))
}
