use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::middleware::role::{
    require_authenticated, require_school, require_school_or_student, require_school_or_teacher,
    require_student,
};
use crate::modules::session::controller::{is_login, sign_out};
use crate::state::AppState;

use super::controller::{
    delete_student, fetch_own_student, fetch_student, fetch_students_with_query, login_student,
    register_student, update_student,
};

pub fn init_students_router(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/login", post(login_student));

    let school_only = Router::new()
        .route("/register", post(register_student))
        .route("/update/{id}", patch(update_student))
        .route("/delete/{id}", delete(delete_student))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school,
        ));

    let school_or_teacher = Router::new()
        .route("/fetch-with-query", get(fetch_students_with_query))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school_or_teacher,
        ));

    let student_only = Router::new()
        .route("/fetch-own", get(fetch_own_student))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_student,
        ));

    let school_or_student = Router::new()
        .route("/fetch-single/{id}", get(fetch_student))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school_or_student,
        ));

    let any_authenticated = Router::new()
        .route("/sign-out", post(sign_out))
        .route("/is-login", get(is_login))
        .route_layer(middleware::from_fn_with_state(state, require_authenticated));

    public
        .merge(school_only)
        .merge(school_or_teacher)
        .merge(student_only)
        .merge(school_or_student)
        .merge(any_authenticated)
}
