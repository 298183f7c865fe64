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
use crate::routes::chat::model::{ChatMessage, NewChatMessage, SendChatMessageBody};
use crate::schema::chat_messages;

// A single shared room; the backlog handed to a joining client is capped so
// the response stays bounded as the table grows.
const CHAT_BACKLOG_LIMIT: i64 = 50;

/******************************************/
// Global chat backlog Route
/******************************************/
/**
 * @route   GET /api/chat/global
 * @access  JWT Protected
 */
#[instrument(name = "Global chat backlog", skip(pool))]
pub async fn list_chat_messages(pool: web::Data<PgPool>) -> Result<HttpResponse, CustomError> {
    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    // Newest N rows, then flipped so the client renders oldest-first.
    let mut rows = chat_messages::table
        .order(chat_messages::created_at.desc())
        .limit(CHAT_BACKLOG_LIMIT)
        .select(ChatMessage::as_select())
        .load::<ChatMessage>(&mut conn)
        .await
        .map_err(DbError)?;
    rows.reverse();

    Ok(HttpResponse::Ok().json(rows))
}

/******************************************/
// Send chat message Route
/******************************************/
/**
 * @route   POST /api/chat/global
 * @access  JWT Protected
 */
#[instrument(name = "Send chat message", skip(pool, body, claims))]
pub async fn send_chat_message(
    pool: web::Data<PgPool>,
    body: web::Json<SendChatMessageBody>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let user = caller_id(&claims.into_inner())?;
    let body = body.into_inner();

    if body.content.trim().is_empty() {
        return Err(CustomError::ValidationError(
            "Message content must not be empty".to_string(),
        ));
    }

    let new_message = NewChatMessage {
        id: Uuid::new_v4(),
        content: body.content,
        user_id: user,
    };

    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let message = diesel::insert_into(chat_messages::table)
        .values(&new_message)
        .returning(ChatMessage::as_returning())
        .get_result::<ChatMessage>(&mut conn)
        .await
        .map_err(DbError)?;

    Ok(HttpResponse::Created().json(message))
}
