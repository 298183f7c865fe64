use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::UserRole;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub avatar: String,
    pub bio: Option<String>,
    pub theme: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// Wire shape for a user record. The password hash is not a field here, so
/// no response path can leak it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub avatar: String,
    pub bio: Option<String>,
    pub theme: String,
    pub created_at: NaiveDateTime,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            username: value.username,
            email: value.email,
            role: value.role,
            avatar: value.avatar,
            bio: value.bio,
            theme: value.theme,
            created_at: value.created_at,
        }
    }
}

#[derive(Deserialize)]
pub struct UpdateRoleBody {
    pub role: UserRole,
}

#[derive(Deserialize, diesel::AsChangeset)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateProfileBody {
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub theme: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn serialized_user_never_contains_the_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            email: "alice@x.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            role: UserRole::Basic,
            avatar: "🎮".into(),
            bio: None,
            theme: "dark".into(),
            created_at: Utc::now().naive_utc(),
        };

        let value = serde_json::to_value(UserResponse::from(user)).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.get("password").is_none());
        assert!(object.get("passwordHash").is_none());
        assert!(object.get("password_hash").is_none());
        assert_eq!(object["username"], "alice");
        assert_eq!(object["role"], "basic");
    }
}
