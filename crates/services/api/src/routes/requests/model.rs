use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::RequestStatus;

#[derive(Debug, Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::requests)]
#[serde(rename_all = "camelCase")]
pub struct GameRequest {
    pub id: Uuid,
    pub game_name: String,
    pub steam_id: Option<String>,
    pub description: Option<String>,
    pub user_id: Uuid,
    pub status: RequestStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::requests)]
pub struct NewGameRequest {
    pub id: Uuid,
    pub game_name: String,
    pub steam_id: Option<String>,
    pub description: Option<String>,
    pub user_id: Uuid,
    pub status: RequestStatus,
}

// A client-supplied `status` field is simply not part of this body; creation
// cannot start anywhere but pending.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    pub game_name: String,
    pub steam_id: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequestStatusBody {
    pub status: RequestStatus,
}
