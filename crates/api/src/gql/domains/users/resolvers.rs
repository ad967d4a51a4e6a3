use async_graphql::{Context, Object, Result};

use super::types::User;
use crate::auth::permissions::require_auth;

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Get the current authenticated user's information
    async fn me(&self, ctx: &Context<'_>) -> Result<User> {
        let user = require_auth(ctx).await?;

        Ok(user.into())
    }
}
