use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::{require_any_school_role, require_teacher};
use crate::state::AppState;

use super::controller::{
    attendance_summary, check_attendance, fetch_attendance, mark_attendance,
};

pub fn init_attendance_router(state: AppState) -> Router<AppState> {
    let teacher_only = Router::new()
        .route("/mark", post(mark_attendance))
        .route("/check/{class_id}", get(check_attendance))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_teacher,
        ));

    let any_school_role = Router::new()
        .route("/fetch/{student_id}", get(fetch_attendance))
        .route("/summary/{student_id}", get(attendance_summary))
        .route_layer(middleware::from_fn_with_state(
            state,
            require_any_school_role,
        ));

    teacher_only.merge(any_school_role)
}
