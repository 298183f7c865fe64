use chrono::NaiveDateTime;
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::games)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    pub genre: String,
    pub image_url: Option<String>,
    pub download_url: String,
    pub steam_id: Option<String>,
    pub min_requirements: Option<String>,
    pub rec_requirements: Option<String>,
    pub verified: bool,
    pub featured: bool,
    pub uploader_id: Option<Uuid>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::games)]
pub struct NewGame {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    pub genre: String,
    pub image_url: Option<String>,
    pub download_url: String,
    pub steam_id: Option<String>,
    pub min_requirements: Option<String>,
    pub rec_requirements: Option<String>,
    pub uploader_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameBody {
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    pub genre: String,
    pub image_url: Option<String>,
    pub download_url: String,
    pub steam_id: Option<String>,
    pub min_requirements: Option<String>,
    pub rec_requirements: Option<String>,
}

#[derive(Debug, Deserialize, AsChangeset)]
#[diesel(table_name = crate::schema::games)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGameBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub genre: Option<String>,
    pub image_url: Option<String>,
    pub download_url: Option<String>,
    pub steam_id: Option<String>,
    pub min_requirements: Option<String>,
    pub rec_requirements: Option<String>,
    pub verified: Option<bool>,
    pub featured: Option<bool>,
}

impl UpdateGameBody {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.short_description.is_none()
            && self.genre.is_none()
            && self.image_url.is_none()
            && self.download_url.is_none()
            && self.steam_id.is_none()
            && self.min_requirements.is_none()
            && self.rec_requirements.is_none()
            && self.verified.is_none()
            && self.featured.is_none()
    }
}

#[derive(Debug, Deserialize)]
pub struct GameFilters {
    pub genre: Option<String>,
    pub featured: Option<bool>,
}
