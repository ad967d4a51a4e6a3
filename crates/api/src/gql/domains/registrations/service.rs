use thiserror::Error;
use uuid::Uuid;

use infra::models::RegistrationRow;
use infra::repos::registrations::{self, CreateRegistrationData};
use infra::repos::tournaments;

/// Outcomes a registration attempt can surface. Display strings are the
/// stable client-facing messages.
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("Tournament not found")]
    NotFound,
    #[error("Already registered for this tournament")]
    AlreadyRegistered,
    #[error("Tournament is full")]
    TournamentFull,
    #[error("Internal database error")]
    Db(#[from] sqlx::Error),
}

// Postgres serialization_failure and deadlock_detected.
const RETRYABLE_SQLSTATES: [&str; 2] = ["40001", "40P01"];

const MAX_ATTEMPTS: u32 = 3;

fn is_retryable(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .map(|code| RETRYABLE_SQLSTATES.contains(&code.as_ref()))
            .unwrap_or(false),
        _ => false,
    }
}

/// Register a user for a tournament.
///
/// Existence, duplicate and capacity checks run inside one transaction that
/// first locks the tournament row, so concurrent attempts for the same
/// tournament serialize: two racers for the last slot yield exactly one
/// success. Transient lock-contention failures are retried a bounded number
/// of times before surfacing.
///
/// The caller (resolver) is responsible for:
/// - Authentication and the participant-role check
/// - Parsing IDs from GraphQL input
/// - Converting the result to GraphQL types
pub async fn register(
    pool: &sqlx::PgPool,
    user_id: Uuid,
    tournament_id: Uuid,
) -> Result<RegistrationRow, RegisterError> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match try_register(pool, user_id, tournament_id).await {
            Err(RegisterError::Db(err)) if attempt < MAX_ATTEMPTS && is_retryable(&err) => {
                tracing::warn!(
                    "Registration attempt {} for tournament {} hit {}, retrying",
                    attempt,
                    tournament_id,
                    err
                );
            }
            result => return result,
        }
    }
}

async fn try_register(
    pool: &sqlx::PgPool,
    user_id: Uuid,
    tournament_id: Uuid,
) -> Result<RegistrationRow, RegisterError> {
    let mut tx = pool.begin().await?;

    // Lock the tournament row so the checks below see a stable count.
    // Dropping the transaction on any error path rolls everything back.
    let tournament = tournaments::get_by_id_for_update(&mut *tx, tournament_id)
        .await?
        .ok_or(RegisterError::NotFound)?;

    if registrations::exists(&mut *tx, tournament_id, user_id).await? {
        return Err(RegisterError::AlreadyRegistered);
    }

    let count = registrations::count_by_tournament(&mut *tx, tournament_id).await?;
    if count >= tournament.max_participants as i64 {
        return Err(RegisterError::TournamentFull);
    }

    let data = CreateRegistrationData {
        tournament_id,
        user_id,
    };
    let row = match registrations::create(&mut *tx, data).await {
        Ok(row) => row,
        // The UNIQUE (tournament_id, user_id) constraint backstops the
        // duplicate check above.
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            return Err(RegisterError::AlreadyRegistered);
        }
        Err(err) => return Err(err.into()),
    };

    tx.commit().await?;

    Ok(row)
}
