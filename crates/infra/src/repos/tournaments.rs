use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, Result};
use std::str::FromStr;
use uuid::Uuid;

use crate::models::TournamentRow;
use crate::pagination::LimitOffset;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, serde::Serialize, serde::Deserialize,
)]
#[sqlx(type_name = "tournament_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl TournamentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentStatus::Upcoming => "upcoming",
            TournamentStatus::Ongoing => "ongoing",
            TournamentStatus::Completed => "completed",
            TournamentStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for TournamentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(TournamentStatus::Upcoming),
            "ongoing" => Ok(TournamentStatus::Ongoing),
            "completed" => Ok(TournamentStatus::Completed),
            "cancelled" => Ok(TournamentStatus::Cancelled),
            _ => Err(format!("Unknown tournament status: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateTournamentData {
    pub name: String,
    pub sport: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    pub max_participants: i32,
    pub organizer_id: Uuid,
}

/// Tournament enriched with its organizer's display name, the current
/// registration count, and whether the viewer is registered. All three come
/// from one statement so they reflect a single snapshot.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TournamentDetailsRow {
    pub id: Uuid,
    pub name: String,
    pub sport: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    pub max_participants: i32,
    pub status: TournamentStatus,
    pub organizer_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub organizer_name: String,
    pub participants_count: i64,
    pub is_registered: bool,
}

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    data: CreateTournamentData,
) -> Result<TournamentRow> {
    sqlx::query_as::<_, TournamentRow>(
        r#"
        INSERT INTO tournaments (name, sport, description, start_time, end_time,
                                 location, max_participants, organizer_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, name, sport, description, start_time, end_time,
                  location, max_participants, status, organizer_id, created_at
        "#,
    )
    .bind(data.name)
    .bind(data.sport)
    .bind(data.description)
    .bind(data.start_time)
    .bind(data.end_time)
    .bind(data.location)
    .bind(data.max_participants)
    .bind(data.organizer_id)
    .fetch_one(executor)
    .await
}

/// Fetch a tournament and lock its row until the surrounding transaction
/// ends. Concurrent registrations for the same tournament serialize here.
pub async fn get_by_id_for_update<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
) -> Result<Option<TournamentRow>> {
    sqlx::query_as::<_, TournamentRow>(
        r#"
        SELECT id, name, sport, description, start_time, end_time,
               location, max_participants, status, organizer_id, created_at
        FROM tournaments
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn list_details<'e>(
    executor: impl PgExecutor<'e>,
    viewer_id: Option<Uuid>,
    page: Option<LimitOffset>,
) -> Result<Vec<TournamentDetailsRow>> {
    let p = page.unwrap_or_default();

    sqlx::query_as::<_, TournamentDetailsRow>(
        r#"
        SELECT t.id, t.name, t.sport, t.description, t.start_time, t.end_time,
               t.location, t.max_participants, t.status, t.organizer_id, t.created_at,
               u.name AS organizer_name,
               COUNT(r.id) AS participants_count,
               COALESCE(BOOL_OR(r.user_id = $1::uuid), FALSE) AS is_registered
        FROM tournaments t
        JOIN users u ON u.id = t.organizer_id
        LEFT JOIN registrations r ON r.tournament_id = t.id
        GROUP BY t.id, u.name
        ORDER BY t.created_at ASC, t.id ASC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(viewer_id)
    .bind(p.limit)
    .bind(p.offset)
    .fetch_all(executor)
    .await
}

pub async fn get_details<'e>(
    executor: impl PgExecutor<'e>,
    viewer_id: Option<Uuid>,
    id: Uuid,
) -> Result<Option<TournamentDetailsRow>> {
    sqlx::query_as::<_, TournamentDetailsRow>(
        r#"
        SELECT t.id, t.name, t.sport, t.description, t.start_time, t.end_time,
               t.location, t.max_participants, t.status, t.organizer_id, t.created_at,
               u.name AS organizer_name,
               COUNT(r.id) AS participants_count,
               COALESCE(BOOL_OR(r.user_id = $1::uuid), FALSE) AS is_registered
        FROM tournaments t
        JOIN users u ON u.id = t.organizer_id
        LEFT JOIN registrations r ON r.tournament_id = t.id
        WHERE t.id = $2
        GROUP BY t.id, u.name
        "#,
    )
    .bind(viewer_id)
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn list_details_by_organizer<'e>(
    executor: impl PgExecutor<'e>,
    organizer_id: Uuid,
) -> Result<Vec<TournamentDetailsRow>> {
    sqlx::query_as::<_, TournamentDetailsRow>(
        r#"
        SELECT t.id, t.name, t.sport, t.description, t.start_time, t.end_time,
               t.location, t.max_participants, t.status, t.organizer_id, t.created_at,
               u.name AS organizer_name,
               COUNT(r.id) AS participants_count,
               FALSE AS is_registered
        FROM tournaments t
        JOIN users u ON u.id = t.organizer_id
        LEFT JOIN registrations r ON r.tournament_id = t.id
        WHERE t.organizer_id = $1
        GROUP BY t.id, u.name
        ORDER BY t.created_at ASC, t.id ASC
        "#,
    )
    .bind(organizer_id)
    .fetch_all(executor)
    .await
}

/// Tournaments the given user is registered for; `is_registered` is computed
/// from the same join that selects the rows.
pub async fn list_details_registered<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
) -> Result<Vec<TournamentDetailsRow>> {
    sqlx::query_as::<_, TournamentDetailsRow>(
        r#"
        SELECT t.id, t.name, t.sport, t.description, t.start_time, t.end_time,
               t.location, t.max_participants, t.status, t.organizer_id, t.created_at,
               u.name AS organizer_name,
               COUNT(r.id) AS participants_count,
               COALESCE(BOOL_OR(r.user_id = $1::uuid), FALSE) AS is_registered
        FROM tournaments t
        JOIN users u ON u.id = t.organizer_id
        LEFT JOIN registrations r ON r.tournament_id = t.id
        WHERE EXISTS (
            SELECT 1 FROM registrations m
            WHERE m.tournament_id = t.id AND m.user_id = $1
        )
        GROUP BY t.id, u.name
        ORDER BY t.created_at ASC, t.id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}
