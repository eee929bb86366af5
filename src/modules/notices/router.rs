use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::middleware::role::{require_any_school_role, require_school};
use crate::state::AppState;

use super::controller::{
    add_notice, delete_notice, fetch_audience_notices, fetch_notices, update_notice,
};

pub fn init_notices_router(state: AppState) -> Router<AppState> {
    let school_only = Router::new()
        .route("/add", post(add_notice))
        .route("/fetch-all", get(fetch_notices))
        .route("/update/{id}", patch(update_notice))
        .route("/delete/{id}", delete(delete_notice))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school,
        ));

    let any_school_role = Router::new()
        .route("/fetch/{audience}", get(fetch_audience_notices))
        .route_layer(middleware::from_fn_with_state(
            state,
            require_any_school_role,
        ));

    school_only.merge(any_school_role)
}
