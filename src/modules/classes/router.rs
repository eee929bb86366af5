use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::middleware::role::{require_school, require_school_or_teacher, require_teacher};
use crate::state::AppState;

use super::controller::{
    add_class_assignment, create_class, delete_class, delete_class_assignment,
    fetch_attendee_classes, fetch_class, fetch_classes, update_class, update_class_assignment,
};

pub fn init_classes_router(state: AppState) -> Router<AppState> {
    let school_only = Router::new()
        .route("/create", post(create_class))
        .route("/update/{id}", patch(update_class))
        .route("/delete/{id}", delete(delete_class))
        .route("/sub-teach/new/{id}", post(add_class_assignment))
        .route(
            "/sub-teach/update/{class_id}/{assignment_id}",
            patch(update_class_assignment),
        )
        .route(
            "/sub-teach/delete/{class_id}/{assignment_id}",
            delete(delete_class_assignment),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school,
        ));

    let school_or_teacher = Router::new()
        .route("/fetch-all", get(fetch_classes))
        .route("/fetch-single/{id}", get(fetch_class))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school_or_teacher,
        ));

    let teacher_only = Router::new()
        .route("/attendee", get(fetch_attendee_classes))
        .route_layer(middleware::from_fn_with_state(state, require_teacher));

    school_only.merge(school_or_teacher).merge(teacher_only)
}
