use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{enroll_student, list_members};

pub fn init_memberships_router() -> Router<AppState> {
    Router::new()
        .route("/classes/{class_id}/members", get(list_members))
        .route("/classes/{class_id}/students", post(enroll_student))
}
