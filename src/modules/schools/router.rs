use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::middleware::role::{require_authenticated, require_school};
use crate::modules::session::controller::{is_login, sign_out};
use crate::state::AppState;

use super::controller::{
    fetch_own_school, login_school, register_school, school_gallery, update_school,
};

pub fn init_schools_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(register_school))
        .route("/login", post(login_school))
        .route("/gallery", get(school_gallery));

    let school_only = Router::new()
        .route("/fetch-own", get(fetch_own_school))
        .route("/update", patch(update_school))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school,
        ));

    let any_authenticated = Router::new()
        .route("/sign-out", post(sign_out))
        .route("/is-login", get(is_login))
        .route_layer(middleware::from_fn_with_state(state, require_authenticated));

    public.merge(school_only).merge(any_authenticated)
}
