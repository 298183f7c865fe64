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
use crate::routes::ratings::model::{NewRating, Rating, SubmitRatingBody};
use crate::schema::ratings;

pub(crate) fn average_rating(rows: &[Rating]) -> Option<f64> {
    if rows.is_empty() {
        return None;
    }
    let sum: i64 = rows.iter().map(|r| i64::from(r.rating)).sum();
    Some(sum as f64 / rows.len() as f64)
}

/******************************************/
// List ratings Route
/******************************************/
/**
 * @route   GET /api/ratings/{game_id}
 * @access  Public
 */
#[instrument(name = "List ratings for game", skip(pool))]
pub async fn list_ratings(
    pool: web::Data<PgPool>,
    game_id: web::Path<Uuid>,
) -> Result<HttpResponse, CustomError> {
    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let rows = ratings::table
        .filter(ratings::game_id.eq(game_id.into_inner()))
        .order(ratings::created_at.desc())
        .select(Rating::as_select())
        .load::<Rating>(&mut conn)
        .await
        .map_err(DbError)?;

    let average = average_rating(&rows);

    Ok(HttpResponse::Ok().json(json!({ "ratings": rows, "average": average })))
}

/******************************************/
// Submit rating Route
/******************************************/
/**
 * @route   POST /api/ratings
 * @access  JWT Protected
 */
// One row per (user, game): the upsert overwrites score and review in place,
// so re-rating never creates a second row.
#[instrument(name = "Submit rating", skip(pool, claims, body), fields(game_id = %body.game_id, rating = body.rating))]
pub async fn submit_rating(
    pool: web::Data<PgPool>,
    body: web::Json<SubmitRatingBody>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let user = caller_id(&claims.into_inner())?;
    let body = body.into_inner();

    if !(1..=10).contains(&body.rating) {
        return Err(CustomError::ValidationError(
            "Rating must be between 1 and 10".to_string(),
        ));
    }

    let new_rating = NewRating {
        id: Uuid::new_v4(),
        user_id: user,
        game_id: body.game_id,
        rating: body.rating,
        review: body.review,
    };

    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let rating = diesel::insert_into(ratings::table)
        .values(&new_rating)
        .on_conflict((ratings::user_id, ratings::game_id))
        .do_update()
        .set((
            ratings::rating.eq(diesel::upsert::excluded(ratings::rating)),
            ratings::review.eq(diesel::upsert::excluded(ratings::review)),
        ))
        .returning(Rating::as_returning())
        .get_result::<Rating>(&mut conn)
        .await
        .map_err(DbError)?;

    Ok(HttpResponse::Ok().json(rating))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn rating_row(score: i32) -> Rating {
        Rating {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            game_id: Uuid::new_v4(),
            rating: score,
            review: None,
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn average_of_no_ratings_is_none() {
        assert!(average_rating(&[]).is_none());
    }

    #[test]
    fn average_is_the_arithmetic_mean() {
        let rows = vec![rating_row(4), rating_row(7), rating_row(10)];
        assert_eq!(average_rating(&rows), Some(7.0));
    }

    #[test]
    fn average_keeps_fractional_part() {
        let rows = vec![rating_row(1), rating_row(2)];
        assert_eq!(average_rating(&rows), Some(1.5));
    }
}
