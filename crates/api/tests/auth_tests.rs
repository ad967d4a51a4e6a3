mod common;

use api::auth::password::{validate_password_strength, PasswordService};
use api::auth::{AuthConfig, JwtService};
use api::error::AppError;
use api::gql::build_schema;
use api::routes::auth::{self, LoginRequest, RegisterRequest};
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use common::*;
use uuid::Uuid;

fn test_jwt_service() -> JwtService {
    let config = AuthConfig {
        jwt_secret: "unit-test-secret".to_string(),
        access_token_expiration_minutes: 60,
    };
    JwtService::new(&config)
}

#[tokio::test]
async fn test_jwt_round_trip() {
    let service = test_jwt_service();
    let user_id = Uuid::new_v4();

    let token = service
        .create_token(
            user_id,
            "alice@test.com".to_string(),
            "participant".to_string(),
        )
        .expect("Token creation should succeed");

    let claims = service.verify_token(&token).expect("Token should verify");

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, "alice@test.com");
    assert_eq!(claims.role, "participant");
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn test_jwt_rejects_tampered_token() {
    let service = test_jwt_service();

    let token = service
        .create_token(
            Uuid::new_v4(),
            "bob@test.com".to_string(),
            "organizer".to_string(),
        )
        .expect("Token creation should succeed");

    let tampered = format!("{}x", token);
    assert!(service.verify_token(&tampered).is_err());
    assert!(service.verify_token("not-a-jwt").is_err());
}

#[tokio::test]
async fn test_jwt_rejects_wrong_secret() {
    let service = test_jwt_service();
    let other = JwtService::new(&AuthConfig {
        jwt_secret: "a-different-secret".to_string(),
        access_token_expiration_minutes: 60,
    });

    let token = service
        .create_token(
            Uuid::new_v4(),
            "carol@test.com".to_string(),
            "participant".to_string(),
        )
        .expect("Token creation should succeed");

    assert!(other.verify_token(&token).is_err());
}

#[tokio::test]
async fn test_password_hash_and_verify() {
    let hash =
        PasswordService::hash_password("correct horse battery").expect("Hashing should succeed");

    assert_ne!(hash, "correct horse battery");
    assert!(
        PasswordService::verify_password("correct horse battery", &hash)
            .expect("Verification should succeed")
    );
    assert!(!PasswordService::verify_password("wrong password", &hash)
        .expect("Verification should succeed"));
}

#[tokio::test]
async fn test_password_strength_policy() {
    assert!(validate_password_strength("1234567").is_err());
    assert!(validate_password_strength("12345678").is_ok());
    assert!(validate_password_strength("a much longer passphrase").is_ok());
}

#[tokio::test]
async fn test_register_login_me_flow() {
    let Some(app_state) = setup_test_db().await else {
        return;
    };

    let unique = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);
    let email = format!("flow_{unique}@test.com");

    let (status, Json(registered)) = auth::register(
        State(app_state.clone()),
        Json(RegisterRequest {
            name: "Flow Tester".to_string(),
            email: email.clone(),
            password: "strong enough".to_string(),
            role: "participant".to_string(),
            phone: Some("0470123456".to_string()),
        }),
    )
    .await
    .expect("Registration should succeed");

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(registered.user.email, email);

    // The signup token authenticates immediately
    let claims = app_state
        .jwt_service()
        .verify_token(&registered.token)
        .expect("Signup token should verify");
    assert_eq!(claims.sub, registered.user.id.to_string());
    assert_eq!(claims.role, "participant");

    let Json(logged_in) = auth::login(
        State(app_state.clone()),
        Json(LoginRequest {
            email: email.clone(),
            password: "strong enough".to_string(),
        }),
    )
    .await
    .expect("Login should succeed");

    assert_eq!(logged_in.user.id, registered.user.id);

    let Json(me_user) = auth::me(State(app_state.clone()), Some(Extension(claims)))
        .await
        .expect("Me should resolve the token's user");
    assert_eq!(me_user.id, registered.user.id);
    assert_eq!(me_user.email, email);
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let Some(app_state) = setup_test_db().await else {
        return;
    };

    let unique = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);
    let email = format!("dup_{unique}@test.com");

    let request = || RegisterRequest {
        name: "Dup Tester".to_string(),
        email: email.clone(),
        password: "strong enough".to_string(),
        role: "organizer".to_string(),
        phone: None,
    };

    auth::register(State(app_state.clone()), Json(request()))
        .await
        .expect("First registration should succeed");

    let err = auth::register(State(app_state.clone()), Json(request()))
        .await
        .expect_err("Second registration should fail");

    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(err.to_string(), "Email already registered");
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let Some(app_state) = setup_test_db().await else {
        return;
    };

    let unique = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);

    let err = auth::register(
        State(app_state.clone()),
        Json(RegisterRequest {
            name: "Role Tester".to_string(),
            email: format!("role_{unique}@test.com"),
            password: "strong enough".to_string(),
            role: "admin".to_string(),
            phone: None,
        }),
    )
    .await
    .expect_err("Unknown role should be rejected");
    assert_eq!(err.to_string(), "Role must be organizer or participant");

    let err = auth::register(
        State(app_state.clone()),
        Json(RegisterRequest {
            name: "Weak Tester".to_string(),
            email: format!("weak_{unique}@test.com"),
            password: "short".to_string(),
            role: "participant".to_string(),
            phone: None,
        }),
    )
    .await
    .expect_err("Weak password should be rejected");
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = auth::register(
        State(app_state.clone()),
        Json(RegisterRequest {
            name: "   ".to_string(),
            email: format!("blank_{unique}@test.com"),
            password: "strong enough".to_string(),
            role: "participant".to_string(),
            phone: None,
        }),
    )
    .await
    .expect_err("Blank name should be rejected");
    assert_eq!(err.to_string(), "Name and email are required");
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let Some(app_state) = setup_test_db().await else {
        return;
    };

    let unique = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);
    let email = format!("creds_{unique}@test.com");

    auth::register(
        State(app_state.clone()),
        Json(RegisterRequest {
            name: "Creds Tester".to_string(),
            email: email.clone(),
            password: "the right password".to_string(),
            role: "participant".to_string(),
            phone: None,
        }),
    )
    .await
    .expect("Registration should succeed");

    let err = auth::login(
        State(app_state.clone()),
        Json(LoginRequest {
            email: email.clone(),
            password: "the wrong password".to_string(),
        }),
    )
    .await
    .expect_err("Wrong password should be rejected");
    assert!(matches!(err, AppError::Unauthorized(_)));
    assert_eq!(err.to_string(), "Invalid credentials");

    let err = auth::login(
        State(app_state.clone()),
        Json(LoginRequest {
            email: format!("nobody_{unique}@test.com"),
            password: "whatever".to_string(),
        }),
    )
    .await
    .expect_err("Unknown email should be rejected");
    assert_eq!(err.to_string(), "Invalid credentials");
}

#[tokio::test]
async fn test_me_requires_token() {
    let Some(app_state) = setup_test_db().await else {
        return;
    };

    let err = auth::me(State(app_state.clone()), None)
        .await
        .expect_err("Missing claims should be rejected");
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn test_me_query_returns_caller() {
    let Some(app_state) = setup_test_db().await else {
        return;
    };
    let schema = build_schema(app_state.clone());

    let unique = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);
    let (user_id, claims) =
        create_test_user(&app_state, &format!("gqlme_{unique}@test.com"), "organizer").await;

    let query = r#"
        query Me {
            me {
                id
                name
                email
                role
            }
        }
    "#;

    let response = execute_graphql(&schema, query, None, Some(claims)).await;
    assert!(
        response.errors.is_empty(),
        "Me query should succeed: {:?}",
        response.errors
    );

    let data = response.data.into_json().unwrap();
    assert_eq!(data["me"]["id"], user_id.to_string());
    assert_eq!(data["me"]["role"], "ORGANIZER");

    let unauthenticated = execute_graphql(&schema, query, None, None).await;
    assert!(
        !unauthenticated.errors.is_empty(),
        "Me query without a token should fail"
    );
    assert_eq!(unauthenticated.errors[0].message, "Not authenticated");
}
