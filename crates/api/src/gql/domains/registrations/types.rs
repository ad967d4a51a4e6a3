use async_graphql::dataloader::DataLoader;
use async_graphql::{ComplexObject, Context, InputObject, SimpleObject, ID};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::gql::domains::tournaments::types::Tournament;
use crate::gql::error::ResultExt;
use crate::gql::loaders::TournamentLoader;

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Registration {
    pub id: ID,
    pub tournament_id: ID,
    pub user_id: ID,
    pub registered_at: DateTime<Utc>,
}

impl From<infra::models::RegistrationRow> for Registration {
    fn from(row: infra::models::RegistrationRow) -> Self {
        Self {
            id: row.id.into(),
            tournament_id: row.tournament_id.into(),
            user_id: row.user_id.into(),
            registered_at: row.registered_at,
        }
    }
}

#[ComplexObject]
impl Registration {
    async fn tournament(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Tournament>> {
        let tournament_id =
            Uuid::parse_str(self.tournament_id.as_str()).gql_err("Invalid tournament ID")?;

        let loader = ctx.data::<DataLoader<TournamentLoader>>()?;

        match loader
            .load_one(tournament_id)
            .await
            .gql_err("Loading tournament failed")?
        {
            Some(row) => Ok(Some(row.into())),
            None => Ok(None),
        }
    }
}

#[derive(InputObject)]
pub struct RegisterForTournamentInput {
    pub tournament_id: ID,
}
