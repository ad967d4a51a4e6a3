use async_graphql::dataloader::DataLoader;
use async_graphql::{ComplexObject, Context, Enum, InputObject, Result, SimpleObject, ID};
use chrono::{DateTime, Utc};

use crate::gql::domains::users::types::User;
use crate::gql::error::ResultExt;
use crate::gql::loaders::UserLoader;
use infra::repos::TournamentDetailsRow;

// Tournament status enum

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub enum TournamentStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl From<TournamentStatus> for infra::repos::tournaments::TournamentStatus {
    fn from(status: TournamentStatus) -> Self {
        match status {
            TournamentStatus::Upcoming => infra::repos::tournaments::TournamentStatus::Upcoming,
            TournamentStatus::Ongoing => infra::repos::tournaments::TournamentStatus::Ongoing,
            TournamentStatus::Completed => infra::repos::tournaments::TournamentStatus::Completed,
            TournamentStatus::Cancelled => infra::repos::tournaments::TournamentStatus::Cancelled,
        }
    }
}

impl From<infra::repos::tournaments::TournamentStatus> for TournamentStatus {
    fn from(status: infra::repos::tournaments::TournamentStatus) -> Self {
        match status {
            infra::repos::tournaments::TournamentStatus::Upcoming => TournamentStatus::Upcoming,
            infra::repos::tournaments::TournamentStatus::Ongoing => TournamentStatus::Ongoing,
            infra::repos::tournaments::TournamentStatus::Completed => TournamentStatus::Completed,
            infra::repos::tournaments::TournamentStatus::Cancelled => TournamentStatus::Cancelled,
        }
    }
}

// Core tournament objects

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Tournament {
    pub id: ID,
    pub name: String,
    pub sport: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    pub max_participants: i32,
    pub status: TournamentStatus,
    pub organizer_id: ID,
    pub created_at: DateTime<Utc>,
}

impl From<infra::models::TournamentRow> for Tournament {
    fn from(row: infra::models::TournamentRow) -> Self {
        Self {
            id: row.id.into(),
            name: row.name,
            sport: row.sport,
            description: row.description,
            start_time: row.start_time,
            end_time: row.end_time,
            location: row.location,
            max_participants: row.max_participants,
            status: row.status.into(),
            organizer_id: row.organizer_id.into(),
            created_at: row.created_at,
        }
    }
}

#[ComplexObject]
impl Tournament {
    async fn organizer(&self, ctx: &Context<'_>) -> Result<User> {
        let loader = ctx.data::<DataLoader<UserLoader>>()?;
        let organizer_uuid =
            uuid::Uuid::parse_str(self.organizer_id.as_str()).gql_err("Invalid organizer ID")?;

        match loader
            .load_one(organizer_uuid)
            .await
            .gql_err("Loading organizer failed")?
        {
            Some(row) => Ok(row.into()),
            None => Err(async_graphql::Error::new("Organizer not found")),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct TournamentDetails {
    pub tournament: Tournament,
    pub organizer_name: String,
    pub participants_count: i32,      // Confirmed registrations so far
    pub is_registered: Option<bool>,  // Populated for participant viewers only
}

impl TournamentDetails {
    /// Build from an enriched row. Count and flag come from the same
    /// statement, so they reflect one snapshot.
    pub fn from_row(row: TournamentDetailsRow, include_registration_flag: bool) -> Self {
        let is_registered = include_registration_flag.then_some(row.is_registered);

        Self {
            tournament: Tournament {
                id: row.id.into(),
                name: row.name,
                sport: row.sport,
                description: row.description,
                start_time: row.start_time,
                end_time: row.end_time,
                location: row.location,
                max_participants: row.max_participants,
                status: row.status.into(),
                organizer_id: row.organizer_id.into(),
                created_at: row.created_at,
            },
            organizer_name: row.organizer_name,
            participants_count: row.participants_count as i32,
            is_registered,
        }
    }
}

#[derive(InputObject)]
pub struct CreateTournamentInput {
    pub name: String,
    pub sport: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    pub max_participants: i32,
}
