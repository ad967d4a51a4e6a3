use std::str::FromStr;

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::password::{validate_password_strength, PasswordService};
use crate::auth::Claims;
use crate::error::AppError;
use crate::state::AppState;
use infra::models::UserRow;
use infra::repos::users::{self, CreateUserData, UserRole};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserRow,
}

/// Create an account and issue a token for it in one step.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let role = UserRole::from_str(payload.role.trim())
        .map_err(|_| AppError::BadRequest("Role must be organizer or participant".to_string()))?;

    let name = payload.name.trim().to_string();
    let email = payload.email.trim().to_lowercase();
    if name.is_empty() || email.is_empty() {
        return Err(AppError::BadRequest("Name and email are required".to_string()));
    }
    validate_password_strength(&payload.password).map_err(AppError::BadRequest)?;

    if users::get_by_email(&state.db, &email).await?.is_some() {
        return Err(AppError::BadRequest("Email already registered".to_string()));
    }

    let password_hash = PasswordService::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // The unique index catches the race where two signups share an email.
    let user = users::create(
        &state.db,
        CreateUserData {
            email,
            name,
            password_hash,
            role,
            phone: payload.phone,
        },
    )
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::BadRequest("Email already registered".to_string())
        }
        _ => AppError::Db(e),
    })?;

    let token = state.jwt_service().create_token(
        user.id,
        user.email.clone(),
        user.role.as_str().to_string(),
    )?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = payload.email.trim().to_lowercase();

    let credentials = users::get_credentials_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = PasswordService::verify_password(&payload.password, &credentials.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !valid {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = state.jwt_service().create_token(
        credentials.id,
        credentials.email.clone(),
        credentials.role.as_str().to_string(),
    )?;
    let user: UserRow = credentials.into();

    Ok(Json(AuthResponse { token, user }))
}

/// Resolve the presented token to the stored user.
pub async fn me(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
) -> Result<Json<UserRow>, AppError> {
    let Extension(claims) =
        claims.ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Not authenticated".to_string()))?;

    let user = users::get_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    Ok(Json(user))
}
