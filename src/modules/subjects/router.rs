use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::middleware::role::require_school;
use crate::state::AppState;

use super::controller::{
    create_subject, delete_subject, fetch_subject, fetch_subjects, update_subject,
};

pub fn init_subjects_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/create", post(create_subject))
        .route("/fetch-all", get(fetch_subjects))
        .route("/fetch-single/{id}", get(fetch_subject))
        .route("/update/{id}", patch(update_subject))
        .route("/delete/{id}", delete(delete_subject))
        .route_layer(middleware::from_fn_with_state(state, require_school))
}
