use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::chat_messages)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub content: String,
    pub user_id: Uuid,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::chat_messages)]
pub struct NewChatMessage {
    pub id: Uuid,
    pub content: String,
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SendChatMessageBody {
    pub content: String,
}
