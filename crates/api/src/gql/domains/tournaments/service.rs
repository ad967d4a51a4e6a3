use thiserror::Error;
use uuid::Uuid;

use infra::repos::tournaments::{self, CreateTournamentData};

use super::types::CreateTournamentInput;

#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Internal database error")]
    Db(#[from] sqlx::Error),
}

/// Check creation input: text fields must be non-empty after trimming,
/// capacity at least 2, and the end must not precede the start.
pub fn validate_new_tournament(input: &CreateTournamentInput) -> Result<(), TournamentError> {
    let required = [
        ("Name", input.name.trim()),
        ("Sport", input.sport.trim()),
        ("Description", input.description.trim()),
        ("Location", input.location.trim()),
    ];
    for (field, value) in required {
        if value.is_empty() {
            return Err(TournamentError::InvalidInput(format!(
                "{} is required",
                field
            )));
        }
    }

    if input.max_participants < 2 {
        return Err(TournamentError::InvalidInput(
            "Maximum participants must be at least 2".to_string(),
        ));
    }

    if input.end_time < input.start_time {
        return Err(TournamentError::InvalidInput(
            "End time cannot be before start time".to_string(),
        ));
    }

    Ok(())
}

/// Validate and persist a new tournament for the given organizer. New
/// tournaments always start in the `upcoming` status.
///
/// The caller (resolver) is responsible for:
/// - Authentication and the organizer-role check
/// - Converting the result to GraphQL types
pub async fn create_tournament(
    pool: &sqlx::PgPool,
    organizer_id: Uuid,
    input: CreateTournamentInput,
) -> Result<infra::models::TournamentRow, TournamentError> {
    validate_new_tournament(&input)?;

    let data = CreateTournamentData {
        name: input.name.trim().to_string(),
        sport: input.sport.trim().to_string(),
        description: input.description.trim().to_string(),
        start_time: input.start_time,
        end_time: input.end_time,
        location: input.location.trim().to_string(),
        max_participants: input.max_participants,
        organizer_id,
    };

    Ok(tournaments::create(pool, data).await?)
}
