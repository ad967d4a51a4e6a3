use async_graphql::{Context, Error, Result};
use uuid::Uuid;

use crate::auth::Claims;
use crate::gql::error::GqlError;
use crate::state::AppState;
use infra::models::UserRow;
use infra::repos::users::{self, UserRole};

/// Resolve the caller's JWT claims to the stored user record.
///
/// Fails when no claims are present (no/invalid token never reaches the
/// context) or when the token's subject no longer resolves to a user.
pub async fn require_auth(ctx: &Context<'_>) -> Result<UserRow> {
    let claims = ctx
        .data::<Claims>()
        .map_err(|_| Error::new("Not authenticated"))?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| Error::new("Not authenticated"))?;

    let state = ctx.data::<AppState>()?;
    let user = users::get_by_id(&state.db, user_id)
        .await
        .map_err(GqlError::from)?
        .ok_or_else(|| Error::new("Not authenticated"))?;

    Ok(user)
}

/// Require the caller to hold exactly `required_role`, failing with
/// `denied_msg` otherwise. The claims role is checked first; the stored
/// role is authoritative.
pub async fn require_role(
    ctx: &Context<'_>,
    required_role: UserRole,
    denied_msg: &str,
) -> Result<UserRow> {
    let claims = ctx
        .data::<Claims>()
        .map_err(|_| Error::new("Not authenticated"))?;

    if claims.role != required_role.as_str() {
        return Err(Error::new(denied_msg));
    }

    let user = require_auth(ctx).await?;
    if user.role != required_role {
        return Err(Error::new(denied_msg));
    }

    Ok(user)
}
