use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, Result};
use std::str::FromStr;
use uuid::Uuid;

use crate::models::UserRow;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, serde::Serialize, serde::Deserialize,
)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Organizer,
    Participant,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Organizer => "organizer",
            UserRole::Participant => "participant",
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "organizer" => Ok(UserRole::Organizer),
            "participant" => Ok(UserRole::Participant),
            _ => Err(format!("Unknown user role: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateUserData {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: UserRole,
    pub phone: Option<String>,
}

/// User row joined with its stored credential; only the login path selects this.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentialsRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub password_hash: String,
}

impl From<UserCredentialsRow> for UserRow {
    fn from(row: UserCredentialsRow) -> Self {
        UserRow {
            id: row.id,
            email: row.email,
            name: row.name,
            role: row.role,
            phone: row.phone,
            created_at: row.created_at,
        }
    }
}

pub async fn create<'e>(executor: impl PgExecutor<'e>, data: CreateUserData) -> Result<UserRow> {
    sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (email, name, password_hash, role, phone)
        VALUES ($1, $2, $3, $4::user_role, $5)
        RETURNING id, email, name, role, phone, created_at
        "#,
    )
    .bind(data.email)
    .bind(data.name)
    .bind(data.password_hash)
    .bind(data.role.as_str())
    .bind(data.phone)
    .fetch_one(executor)
    .await
}

pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, email, name, role, phone, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn get_by_email<'e>(
    executor: impl PgExecutor<'e>,
    email: &str,
) -> Result<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, email, name, role, phone, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(executor)
    .await
}

pub async fn get_credentials_by_email<'e>(
    executor: impl PgExecutor<'e>,
    email: &str,
) -> Result<Option<UserCredentialsRow>> {
    sqlx::query_as::<_, UserCredentialsRow>(
        r#"
        SELECT id, email, name, role, phone, created_at, password_hash
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(executor)
    .await
}
