use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::middleware::role::{
    require_any_school_role, require_school, require_school_or_teacher,
};
use crate::state::AppState;

use super::controller::{
    create_examination, delete_examination, fetch_class_examinations, fetch_examination,
    fetch_examinations, update_examination,
};

pub fn init_examinations_router(state: AppState) -> Router<AppState> {
    let school_only = Router::new()
        .route("/create", post(create_examination))
        .route("/fetch-all", get(fetch_examinations))
        .route("/update/{id}", patch(update_examination))
        .route("/delete/{id}", delete(delete_examination))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school,
        ));

    let school_or_teacher = Router::new()
        .route("/fetch-single/{id}", get(fetch_examination))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school_or_teacher,
        ));

    let any_school_role = Router::new()
        .route("/fetch-class/{class_id}", get(fetch_class_examinations))
        .route_layer(middleware::from_fn_with_state(
            state,
            require_any_school_role,
        ));

    school_only.merge(school_or_teacher).merge(any_school_role)
}
