use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{TicketPriority, TicketStatus};

#[derive(Debug, Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::support_tickets)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub user_id: Uuid,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::support_tickets)]
pub struct NewSupportTicket {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub user_id: Uuid,
    pub status: TicketStatus,
    pub priority: TicketPriority,
}

#[derive(Debug, Deserialize)]
pub struct CreateTicketBody {
    pub title: String,
    pub description: String,
    pub priority: Option<TicketPriority>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTicketStatusBody {
    pub status: TicketStatus,
}

#[derive(Debug, Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::support_ticket_messages)]
#[serde(rename_all = "camelCase")]
pub struct TicketMessage {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub is_admin_reply: bool,
    pub created_at: NaiveDateTime,
}

// No `is_admin_reply` here: the flag is stamped from the verified claims, a
// client cannot ask to be rendered as staff.
#[derive(Debug, Deserialize)]
pub struct CreateTicketMessageBody {
    pub content: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::support_ticket_messages)]
pub struct NewTicketMessage {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub is_admin_reply: bool,
}
