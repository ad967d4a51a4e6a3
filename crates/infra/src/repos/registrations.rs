use sqlx::{PgExecutor, Result};
use uuid::Uuid;

use crate::models::RegistrationRow;

#[derive(Debug, Clone)]
pub struct CreateRegistrationData {
    pub tournament_id: Uuid,
    pub user_id: Uuid,
}

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    data: CreateRegistrationData,
) -> Result<RegistrationRow> {
    sqlx::query_as::<_, RegistrationRow>(
        r#"
        INSERT INTO registrations (tournament_id, user_id)
        VALUES ($1, $2)
        RETURNING id, tournament_id, user_id, registered_at
        "#,
    )
    .bind(data.tournament_id)
    .bind(data.user_id)
    .fetch_one(executor)
    .await
}

pub async fn exists<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
    user_id: Uuid,
) -> Result<bool> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM registrations
            WHERE tournament_id = $1 AND user_id = $2
        )
        "#,
    )
    .bind(tournament_id)
    .bind(user_id)
    .fetch_one(executor)
    .await
}

pub async fn count_by_tournament<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
) -> Result<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM registrations
        WHERE tournament_id = $1
        "#,
    )
    .bind(tournament_id)
    .fetch_one(executor)
    .await
}

pub async fn list_by_user<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
) -> Result<Vec<RegistrationRow>> {
    sqlx::query_as::<_, RegistrationRow>(
        r#"
        SELECT id, tournament_id, user_id, registered_at
        FROM registrations
        WHERE user_id = $1
        ORDER BY registered_at DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}
