use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::middleware::role::{
    require_authenticated, require_school, require_school_or_teacher, require_teacher,
};
use crate::modules::session::controller::{is_login, sign_out};
use crate::state::AppState;

use super::controller::{
    delete_teacher, fetch_own_teacher, fetch_teacher, fetch_teachers_with_query, login_teacher,
    register_teacher, update_teacher,
};

pub fn init_teachers_router(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/login", post(login_teacher));

    let school_only = Router::new()
        .route("/register", post(register_teacher))
        .route("/fetch-with-query", get(fetch_teachers_with_query))
        .route("/update/{id}", patch(update_teacher))
        .route("/delete/{id}", delete(delete_teacher))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school,
        ));

    let teacher_only = Router::new()
        .route("/fetch-own", get(fetch_own_teacher))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_teacher,
        ));

    let school_or_teacher = Router::new()
        .route("/fetch-single/{id}", get(fetch_teacher))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school_or_teacher,
        ));

    let any_authenticated = Router::new()
        .route("/sign-out", post(sign_out))
        .route("/is-login", get(is_login))
        .route_layer(middleware::from_fn_with_state(state, require_authenticated));

    public
        .merge(school_only)
        .merge(teacher_only)
        .merge(school_or_teacher)
        .merge(any_authenticated)
}
