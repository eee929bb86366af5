use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::attendance::router::init_attendance_router;
use crate::modules::classes::router::init_classes_router;
use crate::modules::examinations::router::init_examinations_router;
use crate::modules::notices::router::init_notices_router;
use crate::modules::periods::router::init_periods_router;
use crate::modules::schools::router::init_schools_router;
use crate::modules::students::router::init_students_router;
use crate::modules::subjects::router::init_subjects_router;
use crate::modules::teachers::router::init_teachers_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router, middleware};
use serde_json::json;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/health", get(health))
        .nest(
            "/api",
            Router::new()
                .nest("/school", init_schools_router(state.clone()))
                .nest("/student", init_students_router(state.clone()))
                .nest("/teacher", init_teachers_router(state.clone()))
                .nest("/class", init_classes_router(state.clone()))
                .nest("/subject", init_subjects_router(state.clone()))
                .nest("/examination", init_examinations_router(state.clone()))
                .nest("/period", init_periods_router(state.clone()))
                .nest("/attendance", init_attendance_router(state.clone()))
                .nest("/notices", init_notices_router(state.clone())),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                // The login token travels back in the Authorization response
                // header, so it must be exposed to browser clients.
                .expose_headers([axum::http::header::AUTHORIZATION])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "success": true, "message": "OK" }))
}
