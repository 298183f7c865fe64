use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use anyhow::Context;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use errors::CustomError;
use helpers::auth_jwt::auth::Claims;
use lib_config::db::db::PgPool;
use middleware::jwt::ROLE_ADMIN;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::db_error::DbError;
use crate::routes::auth::caller_id;
use crate::routes::comments::model::{Comment, CreateCommentBody, NewComment, NewCommentLike};
use crate::schema::{comment_likes, comments};

fn comment_not_found() -> CustomError {
    CustomError::DatabaseError {
        msg: "No comment row matched the requested id".to_string(),
        resp: "Comment not found".to_string(),
        status_code: StatusCode::NOT_FOUND,
    }
}

/******************************************/
// List comments Route
/******************************************/
/**
 * @route   GET /api/comments/{game_id}
 * @access  Public
 */
#[instrument(name = "List comments for game", skip(pool))]
pub async fn list_comments(
    pool: web::Data<PgPool>,
    game_id: web::Path<Uuid>,
) -> Result<HttpResponse, CustomError> {
    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let rows = comments::table
        .filter(comments::game_id.eq(game_id.into_inner()))
        .order(comments::created_at.desc())
        .select(Comment::as_select())
        .load::<Comment>(&mut conn)
        .await
        .map_err(DbError)?;

    Ok(HttpResponse::Ok().json(rows))
}

/******************************************/
// Create comment Route
/******************************************/
/**
 * @route   POST /api/comments
 * @access  JWT Protected
 */
#[instrument(name = "Create comment", skip(pool, body, claims))]
pub async fn create_comment(
    pool: web::Data<PgPool>,
    body: web::Json<CreateCommentBody>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let user = caller_id(&claims.into_inner())?;
    let body = body.into_inner();

    if body.content.trim().is_empty() {
        return Err(CustomError::ValidationError(
            "Comment content must not be empty".to_string(),
        ));
    }

    let new_comment = NewComment {
        id: Uuid::new_v4(),
        content: body.content,
        game_id: body.game_id,
        user_id: user,
    };

    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let comment = diesel::insert_into(comments::table)
        .values(&new_comment)
        .returning(Comment::as_returning())
        .get_result::<Comment>(&mut conn)
        .await
        .map_err(DbError)?;

    Ok(HttpResponse::Created().json(comment))
}

/******************************************/
// Delete comment Route
/******************************************/
/**
 * @route   DELETE /api/comments/{comment_id}
 * @access  JWT Protected (owner or admin)
 */
#[instrument(name = "Delete comment", skip(pool, claims))]
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let claims = claims.into_inner();
    let caller = caller_id(&claims)?;
    let comment_id = comment_id.into_inner();

    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let owner = comments::table
        .find(comment_id)
        .select(comments::user_id)
        .first::<Uuid>(&mut conn)
        .await
        .optional()
        .map_err(DbError)?
        .ok_or_else(comment_not_found)?;

    if owner != caller && claims.role != ROLE_ADMIN {
        return Err(CustomError::AuthorizationError(
            "Cannot delete other user's comment".to_string(),
        ));
    }

    diesel::delete(comments::table.find(comment_id))
        .execute(&mut conn)
        .await
        .map_err(DbError)?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Comment deleted successfully" })))
}

/******************************************/
// Toggle comment like Route
/******************************************/
/**
 * @route   POST /api/comments/{comment_id}/like
 * @access  JWT Protected
 */
// Join row and counter move together inside one transaction, so the counter
// cannot drift from the membership table.
#[instrument(name = "Toggle comment like", skip(pool, claims))]
pub async fn toggle_comment_like(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let user = caller_id(&claims.into_inner())?;
    let comment_id = comment_id.into_inner();

    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let exists = comments::table
        .find(comment_id)
        .select(comments::id)
        .first::<Uuid>(&mut conn)
        .await
        .optional()
        .map_err(DbError)?
        .is_some();
    if !exists {
        return Err(comment_not_found());
    }

    let liked = conn
        .transaction::<bool, DbError, _>(|conn| {
            async move {
                let deleted = diesel::delete(
                    comment_likes::table.filter(
                        comment_likes::comment_id
                            .eq(comment_id)
                            .and(comment_likes::user_id.eq(user)),
                    ),
                )
                .execute(conn)
                .await?;

                if deleted > 0 {
                    diesel::update(comments::table.find(comment_id))
                        .set(comments::likes.eq(comments::likes - 1))
                        .execute(conn)
                        .await?;
                    Ok(false)
                } else {
                    let new_like = NewCommentLike {
                        id: Uuid::new_v4(),
                        comment_id,
                        user_id: user,
                    };
                    diesel::insert_into(comment_likes::table)
                        .values(&new_like)
                        .execute(conn)
                        .await?;
                    diesel::update(comments::table.find(comment_id))
                        .set(comments::likes.eq(comments::likes + 1))
                        .execute(conn)
                        .await?;
                    Ok(true)
                }
            }
            .scope_boxed()
        })
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "liked": liked })))
}
