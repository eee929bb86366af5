use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::middleware::role::{
    require_any_school_role, require_school, require_school_or_teacher,
};
use crate::state::AppState;

use super::controller::{
    create_period, delete_period, fetch_class_periods, fetch_period, fetch_periods,
    fetch_teacher_periods, update_period,
};

pub fn init_periods_router(state: AppState) -> Router<AppState> {
    let school_only = Router::new()
        .route("/create", post(create_period))
        .route("/update/{id}", patch(update_period))
        .route("/delete/{id}", delete(delete_period))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school,
        ));

    let school_or_teacher = Router::new()
        .route("/fetch-all", get(fetch_periods))
        .route("/fetch-teacher/{teacher_id}", get(fetch_teacher_periods))
        .route("/fetch-single/{id}", get(fetch_period))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school_or_teacher,
        ));

    let any_school_role = Router::new()
        .route("/fetch-class/{class_id}", get(fetch_class_periods))
        .route_layer(middleware::from_fn_with_state(
            state,
            require_any_school_role,
        ));

    school_only.merge(school_or_teacher).merge(any_school_role)
}
