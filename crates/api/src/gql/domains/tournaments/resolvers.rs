use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::auth::permissions::{require_auth, require_role};
use crate::gql::error::ResultExt;
use crate::state::AppState;
use infra::pagination::LimitOffset;
use infra::repos::tournaments;
use infra::repos::users::UserRole;

use super::service::{self, TournamentError};
use super::types::{CreateTournamentInput, Tournament, TournamentDetails};

#[derive(Default)]
pub struct TournamentQuery;

#[Object]
impl TournamentQuery {
    /// Get all tournaments with organizer name and registration count,
    /// in creation order
    async fn tournaments(
        &self,
        ctx: &Context<'_>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<TournamentDetails>> {
        let state = ctx.data::<AppState>()?;
        let user = require_auth(ctx).await?;

        let include_flag = user.role == UserRole::Participant;
        let viewer_id = include_flag.then_some(user.id);
        let page = LimitOffset::clamped(limit, offset);

        let rows = tournaments::list_details(&state.db, viewer_id, Some(page))
            .await
            .gql_err("Database operation failed")?;

        Ok(rows
            .into_iter()
            .map(|row| TournamentDetails::from_row(row, include_flag))
            .collect())
    }

    /// Get a single tournament by ID, with the same enrichment as the list
    async fn tournament(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<TournamentDetails>> {
        let state = ctx.data::<AppState>()?;
        let user = require_auth(ctx).await?;

        let include_flag = user.role == UserRole::Participant;
        let viewer_id = include_flag.then_some(user.id);

        let row = tournaments::get_details(&state.db, viewer_id, id)
            .await
            .gql_err("Database operation failed")?;

        Ok(row.map(|row| TournamentDetails::from_row(row, include_flag)))
    }

    /// Tournaments relevant to the caller: owned ones for an organizer,
    /// registered ones for a participant
    async fn my_tournaments(&self, ctx: &Context<'_>) -> Result<Vec<TournamentDetails>> {
        let state = ctx.data::<AppState>()?;
        let user = require_auth(ctx).await?;

        let (rows, include_flag) = match user.role {
            UserRole::Organizer => (
                tournaments::list_details_by_organizer(&state.db, user.id)
                    .await
                    .gql_err("Database operation failed")?,
                false,
            ),
            UserRole::Participant => (
                tournaments::list_details_registered(&state.db, user.id)
                    .await
                    .gql_err("Database operation failed")?,
                true,
            ),
        };

        Ok(rows
            .into_iter()
            .map(|row| TournamentDetails::from_row(row, include_flag))
            .collect())
    }
}

#[derive(Default)]
pub struct TournamentMutation;

#[Object]
impl TournamentMutation {
    /// Create a tournament owned by the calling organizer
    async fn create_tournament(
        &self,
        ctx: &Context<'_>,
        input: CreateTournamentInput,
    ) -> Result<Tournament> {
        let state = ctx.data::<AppState>()?;
        let user = require_role(
            ctx,
            UserRole::Organizer,
            "Only organizers can create tournaments",
        )
        .await?;

        let row = service::create_tournament(&state.db, user.id, input)
            .await
            .map_err(|e| {
                if let TournamentError::Db(ref db_err) = e {
                    tracing::error!("Tournament creation failed: {}", db_err);
                }
                async_graphql::Error::new(e.to_string())
            })?;

        Ok(row.into())
    }
}
