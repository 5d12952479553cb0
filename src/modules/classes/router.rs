use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_class, list_my_classes};

pub fn init_classes_router() -> Router<AppState> {
    Router::new()
        .route("/classes", get(list_my_classes))
        .route("/classes/{class_id}", get(get_class))
}
