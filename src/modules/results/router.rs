use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{get_results, publish_results};

pub fn init_results_router() -> Router<AppState> {
    Router::new().route(
        "/exams/{exam_id}/results",
        post(publish_results).get(get_results),
    )
}
