use actix_web::{web, HttpResponse};
use anyhow::Context;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{Double, Nullable};
use diesel_async::RunQueryDsl;
use errors::CustomError;
use lib_config::db::db::PgPool;
use serde_json::json;
use tracing::instrument;

use crate::db_error::DbError;
use crate::schema::{games, ratings, users};

/******************************************/
// Platform stats Route
/******************************************/
/**
 * @route   GET /api/stats
 * @access  Public
 */
#[instrument(name = "Platform stats", skip(pool))]
pub async fn get_stats(pool: web::Data<PgPool>) -> Result<HttpResponse, CustomError> {
    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let total_games: i64 = games::table
        .count()
        .get_result(&mut conn)
        .await
        .map_err(DbError)?;

    let total_users: i64 = users::table
        .count()
        .get_result(&mut conn)
        .await
        .map_err(DbError)?;

    // avg() comes back as numeric; cast in SQL rather than dragging in a
    // decimal type for a single read-only figure.
    let average_rating: Option<f64> = ratings::table
        .select(sql::<Nullable<Double>>("avg(rating)::float8"))
        .first(&mut conn)
        .await
        .map_err(DbError)?;
    let average_rating = average_rating.unwrap_or(0.0);

    // Downloads are not tracked anywhere yet, so the counter stays at zero.
    Ok(HttpResponse::Ok().json(json!({
        "totalGames": total_games,
        "totalUsers": total_users,
        "totalDownloads": 0,
        "averageRating": average_rating,
    })))
}
