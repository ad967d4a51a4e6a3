use std::env;

use api::AppState;
use async_graphql::{EmptySubscription, Request, Schema, Variables};
use chrono::{Duration, Utc};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

pub type TestSchema = Schema<api::gql::QueryRoot, api::gql::MutationRoot, EmptySubscription>;

/// Connect to the test database and bring its schema up to date.
/// Database-backed tests skip when TEST_DATABASE_URL is not set.
pub async fn setup_test_db() -> Option<AppState> {
    let Ok(database_url) = env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set; skipping database-backed test");
        return None;
    };

    if env::var("JWT_SECRET").is_err() {
        env::set_var("JWT_SECRET", "test-jwt-secret");
    }

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    Some(AppState::new(pool).expect("Failed to create AppState"))
}

/// Helper function to execute GraphQL queries and mutations
#[allow(dead_code)]
pub async fn execute_graphql(
    schema: &TestSchema,
    query: &str,
    variables: Option<Variables>,
    auth_claims: Option<api::auth::Claims>,
) -> async_graphql::Response {
    let mut request = Request::new(query);

    if let Some(vars) = variables {
        request = request.variables(vars);
    }

    if let Some(claims) = auth_claims {
        request = request.data(claims);
    }

    schema.execute(request).await
}

/// Create a test user and return its ID plus matching JWT claims.
/// `role` is "organizer" or "participant".
#[allow(dead_code)]
pub async fn create_test_user(
    app_state: &AppState,
    email: &str,
    role: &str,
) -> (Uuid, api::auth::Claims) {
    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (email, name, password_hash, role)
        VALUES ($1, $2, $3, $4::user_role)
        RETURNING id
        "#,
    )
    .bind(email)
    .bind(format!("Test {}", role))
    .bind("$2b$12$dummy.hash.for.testing")
    .bind(role)
    .fetch_one(&app_state.db)
    .await
    .expect("Failed to create test user");

    let claims = api::auth::Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        iat: Utc::now().timestamp(),
        exp: (Utc::now() + Duration::hours(1)).timestamp(),
    };

    (user_id, claims)
}

/// Create a test tournament owned by the given organizer and return its ID.
#[allow(dead_code)]
pub async fn create_test_tournament(
    app_state: &AppState,
    organizer_id: Uuid,
    name: &str,
    max_participants: i32,
) -> Uuid {
    let start = Utc::now() + Duration::days(7);

    let (tournament_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO tournaments (name, sport, description, start_time, end_time,
                                 location, max_participants, organizer_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind("Football")
    .bind("Test tournament description")
    .bind(start)
    .bind(start + Duration::hours(4))
    .bind("Test Arena")
    .bind(max_participants)
    .bind(organizer_id)
    .fetch_one(&app_state.db)
    .await
    .expect("Failed to create test tournament");

    tournament_id
}

/// Insert a registration row directly, bypassing the registration service.
#[allow(dead_code)]
pub async fn create_test_registration(app_state: &AppState, tournament_id: Uuid, user_id: Uuid) {
    sqlx::query("INSERT INTO registrations (tournament_id, user_id) VALUES ($1, $2)")
        .bind(tournament_id)
        .bind(user_id)
        .execute(&app_state.db)
        .await
        .expect("Failed to create test registration");
}

/// Current registration count for a tournament.
#[allow(dead_code)]
pub async fn registration_count(app_state: &AppState, tournament_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM registrations WHERE tournament_id = $1")
        .bind(tournament_id)
        .fetch_one(&app_state.db)
        .await
        .expect("Failed to count registrations")
}
