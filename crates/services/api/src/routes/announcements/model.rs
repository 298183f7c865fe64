use chrono::NaiveDateTime;
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::announcements)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: Uuid,
    pub message: String,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::announcements)]
pub struct NewAnnouncement {
    pub id: Uuid,
    pub message: String,
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateAnnouncementBody {
    pub message: String,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize, AsChangeset)]
#[diesel(table_name = crate::schema::announcements)]
pub struct UpdateAnnouncementBody {
    pub message: Option<String>,
    pub active: Option<bool>,
}

impl UpdateAnnouncementBody {
    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.active.is_none()
    }
}
