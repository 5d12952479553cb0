use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{add_subject, list_subjects};

pub fn init_subjects_router() -> Router<AppState> {
    Router::new().route(
        "/classes/{class_id}/subjects",
        get(list_subjects).post(add_subject),
    )
}
