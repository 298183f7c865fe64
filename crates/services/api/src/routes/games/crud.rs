use actix_web::http::StatusCode;
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
use crate::routes::games::model::{CreateGameBody, Game, GameFilters, NewGame, UpdateGameBody};
use crate::schema::games;

fn game_not_found() -> CustomError {
    CustomError::DatabaseError {
        msg: "No game row matched the requested id".to_string(),
        resp: "Game not found".to_string(),
        status_code: StatusCode::NOT_FOUND,
    }
}

/******************************************/
// List games Route
/******************************************/
/**
 * @route   GET /api/games?genre=&featured=
 * @access  Public
 */
#[instrument(name = "List games", skip(pool))]
pub async fn list_games(
    pool: web::Data<PgPool>,
    filters: web::Query<GameFilters>,
) -> Result<HttpResponse, CustomError> {
    let filters = filters.into_inner();
    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let mut query = games::table.into_boxed();
    if filters.featured == Some(true) {
        query = query.filter(games::featured.eq(true));
    } else if let Some(genre) = filters.genre {
        query = query.filter(games::genre.eq(genre));
    }

    let rows = query
        .order(games::created_at.desc())
        .select(Game::as_select())
        .load::<Game>(&mut conn)
        .await
        .map_err(DbError)?;

    Ok(HttpResponse::Ok().json(rows))
}

/******************************************/
// Get game Route
/******************************************/
/**
 * @route   GET /api/games/{game_id}
 * @access  Public
 */
#[instrument(name = "Get game by id", skip(pool))]
pub async fn get_game(
    pool: web::Data<PgPool>,
    game_id: web::Path<Uuid>,
) -> Result<HttpResponse, CustomError> {
    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let game = games::table
        .find(game_id.into_inner())
        .select(Game::as_select())
        .first::<Game>(&mut conn)
        .await
        .optional()
        .map_err(DbError)?
        .ok_or_else(game_not_found)?;

    Ok(HttpResponse::Ok().json(game))
}

/******************************************/
// Create game Route
/******************************************/
/**
 * @route   POST /api/games
 * @access  Gameadder/Admin
 */
#[instrument(name = "Create game", skip(pool, req_game, claims), fields(title = %req_game.title))]
pub async fn create_game(
    pool: web::Data<PgPool>,
    req_game: web::Json<CreateGameBody>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let uploader = caller_id(&claims.into_inner())?;
    let game_data = req_game.into_inner();

    if game_data.title.trim().is_empty() {
        return Err(CustomError::ValidationError(
            "Game title must not be empty".to_string(),
        ));
    }
    if game_data.download_url.trim().is_empty() {
        return Err(CustomError::ValidationError(
            "Download URL must not be empty".to_string(),
        ));
    }

    let new_game = NewGame {
        id: Uuid::new_v4(),
        title: game_data.title,
        description: game_data.description,
        short_description: game_data.short_description,
        genre: game_data.genre,
        image_url: game_data.image_url,
        download_url: game_data.download_url,
        steam_id: game_data.steam_id,
        min_requirements: game_data.min_requirements,
        rec_requirements: game_data.rec_requirements,
        uploader_id: Some(uploader),
    };

    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let game = diesel::insert_into(games::table)
        .values(&new_game)
        .returning(Game::as_returning())
        .get_result::<Game>(&mut conn)
        .await
        .map_err(DbError)?;

    Ok(HttpResponse::Created().json(game))
}

/******************************************/
// Update game Route
/******************************************/
/**
 * @route   PATCH /api/games/{game_id}
 * @access  Admin
 */
#[instrument(name = "Update game", skip(pool, game_data))]
pub async fn update_game(
    pool: web::Data<PgPool>,
    game_id: web::Path<Uuid>,
    game_data: web::Json<UpdateGameBody>,
) -> Result<HttpResponse, CustomError> {
    let game_data = game_data.into_inner();
    if game_data.is_empty() {
        return Err(CustomError::ValidationError(
            "No game fields provided".to_string(),
        ));
    }

    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let game = diesel::update(games::table.find(game_id.into_inner()))
        .set(&game_data)
        .returning(Game::as_returning())
        .get_result::<Game>(&mut conn)
        .await
        .optional()
        .map_err(DbError)?
        .ok_or_else(game_not_found)?;

    Ok(HttpResponse::Ok().json(game))
}

/******************************************/
// Delete game Route
/******************************************/
/**
 * @route   DELETE /api/games/{game_id}
 * @access  Admin
 */
#[instrument(name = "Delete game", skip(pool))]
pub async fn delete_game(
    pool: web::Data<PgPool>,
    game_id: web::Path<Uuid>,
) -> Result<HttpResponse, CustomError> {
    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let rows_deleted = diesel::delete(games::table.find(game_id.into_inner()))
        .execute(&mut conn)
        .await
        .map_err(DbError)?;

    if rows_deleted == 0 {
        return Err(game_not_found());
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Game deleted successfully" })))
}
