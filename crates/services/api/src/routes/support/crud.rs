use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use anyhow::Context;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use errors::CustomError;
use helpers::auth_jwt::auth::Claims;
use lib_config::db::db::PgPool;
use middleware::jwt::ROLE_ADMIN;
use tracing::instrument;
use uuid::Uuid;

use crate::db_error::DbError;
use crate::models::{TicketPriority, TicketStatus};
use crate::routes::auth::caller_id;
use crate::routes::support::model::{
    CreateTicketBody, CreateTicketMessageBody, NewSupportTicket, NewTicketMessage, SupportTicket,
    TicketMessage, UpdateTicketStatusBody,
};
use crate::schema::{support_ticket_messages, support_tickets};

fn ticket_not_found() -> CustomError {
    CustomError::DatabaseError {
        msg: "No support ticket row matched the requested id".to_string(),
        resp: "Ticket not found".to_string(),
        status_code: StatusCode::NOT_FOUND,
    }
}

// Messages are visible to the ticket's owner and to admins, nobody else.
async fn load_ticket_for(
    conn: &mut diesel_async::AsyncPgConnection,
    ticket_id: Uuid,
    claims: &Claims,
) -> Result<SupportTicket, CustomError> {
    let caller = caller_id(claims)?;

    let ticket = support_tickets::table
        .find(ticket_id)
        .select(SupportTicket::as_select())
        .first::<SupportTicket>(conn)
        .await
        .optional()
        .map_err(DbError)?
        .ok_or_else(ticket_not_found)?;

    if ticket.user_id != caller && claims.role != ROLE_ADMIN {
        return Err(CustomError::AuthorizationError(
            "Cannot access another user's ticket".to_string(),
        ));
    }
    Ok(ticket)
}

/******************************************/
// List tickets Route
/******************************************/
/**
 * @route   GET /api/support
 * @access  JWT Protected (own; admin sees all)
 */
#[instrument(name = "List support tickets", skip(pool, claims))]
pub async fn list_tickets(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let claims = claims.into_inner();
    let caller = caller_id(&claims)?;

    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let mut query = support_tickets::table.into_boxed();
    if claims.role != ROLE_ADMIN {
        query = query.filter(support_tickets::user_id.eq(caller));
    }

    let rows = query
        .order(support_tickets::created_at.desc())
        .select(SupportTicket::as_select())
        .load::<SupportTicket>(&mut conn)
        .await
        .map_err(DbError)?;

    Ok(HttpResponse::Ok().json(rows))
}

/******************************************/
// Create ticket Route
/******************************************/
/**
 * @route   POST /api/support
 * @access  JWT Protected
 */
#[instrument(name = "Create support ticket", skip(pool, body, claims), fields(title = %body.title))]
pub async fn create_ticket(
    pool: web::Data<PgPool>,
    body: web::Json<CreateTicketBody>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let user = caller_id(&claims.into_inner())?;
    let body = body.into_inner();

    if body.title.trim().is_empty() || body.description.trim().is_empty() {
        return Err(CustomError::ValidationError(
            "Title and description must not be empty".to_string(),
        ));
    }

    let new_ticket = NewSupportTicket {
        id: Uuid::new_v4(),
        title: body.title,
        description: body.description,
        user_id: user,
        status: TicketStatus::Open,
        priority: body.priority.unwrap_or(TicketPriority::Medium),
    };

    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let ticket = diesel::insert_into(support_tickets::table)
        .values(&new_ticket)
        .returning(SupportTicket::as_returning())
        .get_result::<SupportTicket>(&mut conn)
        .await
        .map_err(DbError)?;

    Ok(HttpResponse::Created().json(ticket))
}

/******************************************/
// Update ticket status Route
/******************************************/
/**
 * @route   PATCH /api/support/{ticket_id}/status
 * @access  Admin
 */
#[instrument(name = "Update ticket status", skip(pool, body))]
pub async fn update_ticket_status(
    pool: web::Data<PgPool>,
    ticket_id: web::Path<Uuid>,
    body: web::Json<UpdateTicketStatusBody>,
) -> Result<HttpResponse, CustomError> {
    let ticket_id = ticket_id.into_inner();
    let next = body.into_inner().status;

    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    let current = support_tickets::table
        .find(ticket_id)
        .select(support_tickets::status)
        .first::<TicketStatus>(&mut conn)
        .await
        .optional()
        .map_err(DbError)?
        .ok_or_else(ticket_not_found)?;

    if !current.can_transition_to(next) {
        return Err(CustomError::ValidationError(format!(
            "Cannot change ticket status from {:?} to {:?}",
            current, next
        )));
    }

    let completed_at = if next == TicketStatus::Completed {
        Some(Utc::now().naive_utc())
    } else {
        None
    };

    // Conditional on the status still matching the transition check, so a
    // racing admin write can never move a ticket out of a terminal state.
    let ticket = diesel::update(
        support_tickets::table
            .find(ticket_id)
            .filter(support_tickets::status.eq(current)),
    )
    .set((
        support_tickets::status.eq(next),
        support_tickets::completed_at.eq(completed_at),
    ))
    .returning(SupportTicket::as_returning())
    .get_result::<SupportTicket>(&mut conn)
    .await
    .optional()
    .map_err(DbError)?
    .ok_or(CustomError::DatabaseError {
        msg: "Ticket status changed between read and update".to_string(),
        resp: "Ticket status changed concurrently".to_string(),
        status_code: StatusCode::CONFLICT,
    })?;

    Ok(HttpResponse::Ok().json(ticket))
}

/******************************************/
// List ticket messages Route
/******************************************/
/**
 * @route   GET /api/support/{ticket_id}/messages
 * @access  JWT Protected (ticket owner or admin)
 */
#[instrument(name = "List ticket messages", skip(pool, claims))]
pub async fn list_ticket_messages(
    pool: web::Data<PgPool>,
    ticket_id: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let claims = claims.into_inner();
    let ticket_id = ticket_id.into_inner();

    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    load_ticket_for(&mut conn, ticket_id, &claims).await?;

    let rows = support_ticket_messages::table
        .filter(support_ticket_messages::ticket_id.eq(ticket_id))
        .order(support_ticket_messages::created_at.asc())
        .select(TicketMessage::as_select())
        .load::<TicketMessage>(&mut conn)
        .await
        .map_err(DbError)?;

    Ok(HttpResponse::Ok().json(rows))
}

/******************************************/
// Create ticket message Route
/******************************************/
/**
 * @route   POST /api/support/{ticket_id}/messages
 * @access  JWT Protected (ticket owner or admin)
 */
#[instrument(name = "Create ticket message", skip(pool, body, claims))]
pub async fn create_ticket_message(
    pool: web::Data<PgPool>,
    ticket_id: web::Path<Uuid>,
    body: web::Json<CreateTicketMessageBody>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, CustomError> {
    let claims = claims.into_inner();
    let user = caller_id(&claims)?;
    let ticket_id = ticket_id.into_inner();
    let body = body.into_inner();

    if body.content.trim().is_empty() {
        return Err(CustomError::ValidationError(
            "Message content must not be empty".to_string(),
        ));
    }

    let mut conn = pool
        .get()
        .await
        .context("Failed to fetch connection from pool")?;

    load_ticket_for(&mut conn, ticket_id, &claims).await?;

    let new_message = NewTicketMessage {
        id: Uuid::new_v4(),
        ticket_id,
        user_id: user,
        content: body.content,
        is_admin_reply: claims.role == ROLE_ADMIN,
    };

    let message = diesel::insert_into(support_ticket_messages::table)
        .values(&new_message)
        .returning(TicketMessage::as_returning())
        .get_result::<TicketMessage>(&mut conn)
        .await
        .map_err(DbError)?;

    Ok(HttpResponse::Created().json(message))
}
