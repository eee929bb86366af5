use sparkschool::config::jwt::JwtConfig;
use sparkschool::middleware::role::UserRole;
use sparkschool::utils::jwt::{TokenSubject, create_access_token, verify_token};
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        token_expiry: 3600,
    }
}

fn subject(id: Uuid, school_id: Uuid, role: UserRole) -> TokenSubject<'static> {
    TokenSubject {
        id,
        school_id,
        role,
        name: "Test Principal",
        email: Some("test@example.com"),
        image_url: None,
    }
}

#[test]
fn test_create_access_token_success() {
    let jwt_config = get_test_jwt_config();
    let result = create_access_token(
        subject(Uuid::new_v4(), Uuid::new_v4(), UserRole::Student),
        &jwt_config,
    );

    assert!(result.is_ok());
    assert!(!result.unwrap().is_empty());
}

#[test]
fn test_create_access_token_all_roles() {
    let jwt_config = get_test_jwt_config();

    for role in [UserRole::School, UserRole::Teacher, UserRole::Student] {
        let result =
            create_access_token(subject(Uuid::new_v4(), Uuid::new_v4(), role), &jwt_config);
        assert!(result.is_ok());
    }
}

#[test]
fn test_verify_token_round_trips_identity() {
    let jwt_config = get_test_jwt_config();
    let principal_id = Uuid::new_v4();
    let school_id = Uuid::new_v4();

    let token = create_access_token(
        subject(principal_id, school_id, UserRole::Teacher),
        &jwt_config,
    )
    .unwrap();

    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, principal_id.to_string());
    assert_eq!(claims.school_id, school_id);
    assert_eq!(claims.role, UserRole::Teacher);
    assert_eq!(claims.email.as_deref(), Some("test@example.com"));
}

#[test]
fn test_verify_token_is_stable_across_repeat_verification() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token(
        subject(Uuid::new_v4(), Uuid::new_v4(), UserRole::School),
        &jwt_config,
    )
    .unwrap();

    let first = verify_token(&token, &jwt_config).unwrap();
    let second = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(first.sub, second.sub);
    assert_eq!(first.school_id, second.school_id);
    assert_eq!(first.exp, second.exp);
}

#[test]
fn test_verify_token_sets_expiry_from_config() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token(
        subject(Uuid::new_v4(), Uuid::new_v4(), UserRole::Student),
        &jwt_config,
    )
    .unwrap();

    let claims = verify_token(&token, &jwt_config).unwrap();
    assert_eq!(claims.exp - claims.iat, jwt_config.token_expiry as usize);
}

#[test]
fn test_verify_token_rejects_garbage() {
    let jwt_config = get_test_jwt_config();

    assert!(verify_token("not-a-token", &jwt_config).is_err());
    assert!(verify_token("", &jwt_config).is_err());
    assert!(verify_token("a.b.c", &jwt_config).is_err());
}

#[test]
fn test_verify_token_rejects_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let other_config = JwtConfig {
        secret: "a_completely_different_secret".to_string(),
        token_expiry: 3600,
    };

    let token = create_access_token(
        subject(Uuid::new_v4(), Uuid::new_v4(), UserRole::School),
        &jwt_config,
    )
    .unwrap();

    assert!(verify_token(&token, &other_config).is_err());
}

#[test]
fn test_verify_token_rejects_tampered_payload() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token(
        subject(Uuid::new_v4(), Uuid::new_v4(), UserRole::Student),
        &jwt_config,
    )
    .unwrap();

    // Flip a character in the payload segment.
    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    let payload = &mut parts[1];
    let flipped = if payload.ends_with('A') { "B" } else { "A" };
    payload.truncate(payload.len() - 1);
    payload.push_str(flipped);
    let tampered = parts.join(".");

    assert!(verify_token(&tampered, &jwt_config).is_err());
}
