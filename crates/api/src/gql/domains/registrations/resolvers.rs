use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::auth::permissions::require_role;
use crate::gql::error::ResultExt;
use crate::state::AppState;
use infra::repos::registrations;
use infra::repos::users::UserRole;

use super::service::{self, RegisterError};
use super::types::{RegisterForTournamentInput, Registration};

#[derive(Default)]
pub struct RegistrationQuery;

#[Object]
impl RegistrationQuery {
    /// The calling participant's registrations, newest first
    async fn my_registrations(&self, ctx: &Context<'_>) -> Result<Vec<Registration>> {
        let state = ctx.data::<AppState>()?;
        let user = require_role(
            ctx,
            UserRole::Participant,
            "Only participants have registrations",
        )
        .await?;

        let rows = registrations::list_by_user(&state.db, user.id)
            .await
            .gql_err("Database operation failed")?;

        Ok(rows.into_iter().map(Registration::from).collect())
    }
}

#[derive(Default)]
pub struct RegistrationMutation;

#[Object]
impl RegistrationMutation {
    /// Register the calling participant for a tournament. Existence,
    /// duplicate and capacity checks are atomic with respect to concurrent
    /// registrations for the same tournament.
    async fn register_for_tournament(
        &self,
        ctx: &Context<'_>,
        input: RegisterForTournamentInput,
    ) -> Result<Registration> {
        let state = ctx.data::<AppState>()?;
        let user = require_role(
            ctx,
            UserRole::Participant,
            "Only participants can register for tournaments",
        )
        .await?;

        let tournament_id =
            Uuid::parse_str(input.tournament_id.as_str()).gql_err("Invalid tournament ID")?;

        let row = service::register(&state.db, user.id, tournament_id)
            .await
            .map_err(|e| {
                if let RegisterError::Db(ref db_err) = e {
                    tracing::error!("Registration failed: {}", db_err);
                }
                async_graphql::Error::new(e.to_string())
            })?;

        Ok(row.into())
    }
}
