//! Tenant-isolation tests against a real database.
//!
//! Two schools are seeded side by side; every assertion checks that a
//! principal of one school cannot observe or mutate the other school's rows,
//! and that dependency-blocked deletes refuse with 409 while the row
//! survives.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{
    create_test_class, create_test_school, create_test_student, create_test_teacher, mint_token,
    test_state_with_pool,
};
use http_body_util::BodyExt;
use serde_json::json;
use sparkschool::middleware::role::UserRole;
use sparkschool::router::init_router;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

fn setup_test_app(pool: PgPool) -> axum::Router {
    init_router(test_state_with_pool(pool))
}

fn school_token(school_id: Uuid) -> String {
    mint_token(UserRole::School, school_id, school_id)
}

fn request(method: &str, uri: &str, token: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));

    match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&value).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn cross_tenant_fetch_is_not_found(pool: PgPool) {
    let school_a = create_test_school(&pool, "North High").await;
    let school_b = create_test_school(&pool, "South High").await;
    let student_b = create_test_student(&pool, school_b, None, "Bea").await;

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(request(
            "GET",
            &format!("/api/student/fetch-single/{student_b}"),
            &school_token(school_a),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The owning school still sees the row.
    let app = setup_test_app(pool);
    let response = app
        .oneshot(request(
            "GET",
            &format!("/api/student/fetch-single/{student_b}"),
            &school_token(school_b),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn cross_tenant_update_is_not_found_and_leaves_row_unchanged(pool: PgPool) {
    let school_a = create_test_school(&pool, "North High").await;
    let school_b = create_test_school(&pool, "South High").await;
    let student_b = create_test_student(&pool, school_b, None, "Bea").await;

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(request(
            "PATCH",
            &format!("/api/student/update/{student_b}"),
            &school_token(school_a),
            Some(json!({ "name": "Hijacked" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let name = sqlx::query_scalar::<_, String>("SELECT name FROM students WHERE id = $1")
        .bind(student_b)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(name, "Bea");
}

#[sqlx::test(migrations = "./migrations")]
async fn cross_tenant_delete_is_not_found_and_row_survives(pool: PgPool) {
    let school_a = create_test_school(&pool, "North High").await;
    let school_b = create_test_school(&pool, "South High").await;
    let teacher_b = create_test_teacher(&pool, school_b, "Mr B").await;

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(request(
            "DELETE",
            &format!("/api/teacher/delete/{teacher_b}"),
            &school_token(school_a),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teachers WHERE id = $1")
        .bind(teacher_b)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn class_delete_with_enrolled_student_conflicts(pool: PgPool) {
    let school = create_test_school(&pool, "North High").await;
    let class = create_test_class(&pool, school, "Grade 5").await;
    create_test_student(&pool, school, Some(class), "Ann").await;

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(request(
            "DELETE",
            &format!("/api/class/delete/{class}"),
            &school_token(school),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The refused delete must leave the class in place.
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM classes WHERE id = $1")
        .bind(class)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn empty_class_delete_succeeds(pool: PgPool) {
    let school = create_test_school(&pool, "North High").await;
    let class = create_test_class(&pool, school, "Grade 5").await;

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(request(
            "DELETE",
            &format!("/api/class/delete/{class}"),
            &school_token(school),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn fetch_all_returns_disjoint_sets_per_school(pool: PgPool) {
    let school_a = create_test_school(&pool, "North High").await;
    let school_b = create_test_school(&pool, "South High").await;
    let class_a = create_test_class(&pool, school_a, "Grade 1").await;
    let class_b = create_test_class(&pool, school_b, "Grade 9").await;

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(request(
            "GET",
            "/api/class/fetch-all",
            &school_token(school_a),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|class| class["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![class_a.to_string().as_str()]);

    let app = setup_test_app(pool);
    let response = app
        .oneshot(request(
            "GET",
            "/api/class/fetch-all",
            &school_token(school_b),
            None,
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|class| class["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![class_b.to_string().as_str()]);
}

#[sqlx::test(migrations = "./migrations")]
async fn update_of_absent_row_is_not_found_not_internal(pool: PgPool) {
    let school = create_test_school(&pool, "North High").await;

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(request(
            "PATCH",
            &format!("/api/class/update/{}", Uuid::new_v4()),
            &school_token(school),
            Some(json!({ "class_text": "Grade 2" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = setup_test_app(pool);
    let response = app
        .oneshot(request(
            "PATCH",
            &format!("/api/notices/update/{}", Uuid::new_v4()),
            &school_token(school),
            Some(json!({ "title": "Updated" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
