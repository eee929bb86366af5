//! Authorization-path tests driven through the full router.
//!
//! Every request here is either rejected before any data access or served by
//! a handler that only echoes session claims, so no database is required.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{mint_token, test_state};
use http_body_util::BodyExt;
use sparkschool::middleware::role::UserRole;
use sparkschool::router::init_router;
use tower::ServiceExt;
use uuid::Uuid;

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn get_with_auth(uri: &str, auth_value: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, auth_value)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let app = init_router(test_state());
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_token_is_rejected() {
    let app = init_router(test_state());
    let response = app.oneshot(get("/api/class/fetch-all")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn undefined_literal_token_is_rejected() {
    let app = init_router(test_state());
    let response = app
        .oneshot(get_with_auth("/api/class/fetch-all", "Bearer undefined"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_rejected_not_crashed() {
    let app = init_router(test_state());
    let response = app
        .oneshot(get_with_auth(
            "/api/school/is-login",
            "Bearer definitely.not.ajwt",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_role_is_forbidden_not_unauthorized() {
    let app = init_router(test_state());
    let token = mint_token(UserRole::Student, Uuid::new_v4(), Uuid::new_v4());

    // Students cannot list classes; the token itself is valid.
    let response = app
        .oneshot(get_with_auth(
            "/api/class/fetch-all",
            &format!("Bearer {token}"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn student_cannot_reach_school_only_routes() {
    let app = init_router(test_state());
    let token = mint_token(UserRole::Student, Uuid::new_v4(), Uuid::new_v4());

    let response = app
        .oneshot(get_with_auth(
            "/api/subject/fetch-all",
            &format!("Bearer {token}"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn teacher_cannot_list_the_teacher_roster() {
    let app = init_router(test_state());
    let token = mint_token(UserRole::Teacher, Uuid::new_v4(), Uuid::new_v4());

    // The roster is a school-owner view; a teacher's valid token earns a
    // 403, not the list.
    let response = app
        .oneshot(get_with_auth(
            "/api/teacher/fetch-with-query",
            &format!("Bearer {token}"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn teacher_cannot_reach_school_only_routes() {
    let app = init_router(test_state());
    let token = mint_token(UserRole::Teacher, Uuid::new_v4(), Uuid::new_v4());

    let response = app
        .oneshot(get_with_auth(
            "/api/notices/fetch-all",
            &format!("Bearer {token}"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn is_login_echoes_claims() {
    let app = init_router(test_state());
    let principal_id = Uuid::new_v4();
    let school_id = Uuid::new_v4();
    let token = mint_token(UserRole::School, principal_id, school_id);

    let response = app
        .oneshot(get_with_auth(
            "/api/school/is-login",
            &format!("Bearer {token}"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["sub"], principal_id.to_string());
    assert_eq!(body["data"]["school_id"], school_id.to_string());
    assert_eq!(body["data"]["role"], "SCHOOL");
}

#[tokio::test]
async fn is_login_accepts_any_role_on_any_prefix() {
    let token = mint_token(UserRole::Teacher, Uuid::new_v4(), Uuid::new_v4());

    // The empty allowed-role set behind is-login admits every authenticated
    // principal, even under another role's prefix.
    for uri in [
        "/api/student/is-login",
        "/api/teacher/is-login",
        "/api/school/is-login",
    ] {
        let app = init_router(test_state());
        let response = app
            .oneshot(get_with_auth(uri, &format!("Bearer {token}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "uri: {uri}");
    }
}

#[tokio::test]
async fn bare_token_without_bearer_prefix_is_accepted() {
    let app = init_router(test_state());
    let token = mint_token(UserRole::Student, Uuid::new_v4(), Uuid::new_v4());

    let response = app
        .oneshot(get_with_auth("/api/student/is-login", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn query_param_token_is_accepted() {
    let app = init_router(test_state());
    let token = mint_token(UserRole::Student, Uuid::new_v4(), Uuid::new_v4());

    let response = app
        .oneshot(get(&format!("/api/student/is-login?token={token}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn sign_out_clears_authorization_header() {
    let app = init_router(test_state());
    let token = mint_token(UserRole::School, Uuid::new_v4(), Uuid::new_v4());

    let request = Request::builder()
        .method("POST")
        .uri("/api/school/sign-out")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let auth_header = response
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    assert_eq!(auth_header, Some(""));
}

#[tokio::test]
async fn sign_out_requires_a_token() {
    let app = init_router(test_state());

    let request = Request::builder()
        .method("POST")
        .uri("/api/teacher/sign-out")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_other_secret_is_rejected() {
    use sparkschool::config::jwt::JwtConfig;
    use sparkschool::utils::jwt::{TokenSubject, create_access_token};

    let app = init_router(test_state());
    let foreign_config = JwtConfig {
        secret: "some_other_service_secret".to_string(),
        token_expiry: 3600,
    };
    let token = create_access_token(
        TokenSubject {
            id: Uuid::new_v4(),
            school_id: Uuid::new_v4(),
            role: UserRole::School,
            name: "Imposter",
            email: None,
            image_url: None,
        },
        &foreign_config,
    )
    .unwrap();

    let response = app
        .oneshot(get_with_auth(
            "/api/school/is-login",
            &format!("Bearer {token}"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
