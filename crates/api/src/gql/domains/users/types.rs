use async_graphql::{Enum, SimpleObject, ID};
use chrono::{DateTime, Utc};

use infra::models::UserRow;
use infra::repos::users::UserRole;

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub enum Role {
    Organizer,
    Participant,
}

impl From<UserRole> for Role {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Organizer => Role::Organizer,
            UserRole::Participant => Role::Participant,
        }
    }
}

impl From<Role> for UserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Organizer => UserRole::Organizer,
            Role::Participant => UserRole::Participant,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id.into(),
            name: row.name,
            email: row.email,
            role: row.role.into(),
            phone: row.phone,
            created_at: row.created_at,
        }
    }
}
