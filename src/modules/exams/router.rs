use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_exam, list_exams};

pub fn init_exams_router() -> Router<AppState> {
    Router::new()
        .route("/classes/{class_id}/exams", get(list_exams))
        .route(
            "/classes/{class_id}/subjects/{subject_id}/exams",
            post(create_exam),
        )
}
