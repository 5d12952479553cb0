use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use classbook_core::{AppError, DomainError};
use classbook_models::ids::ExamId;
use classbook_models::results::{ExamResultsResponse, PublishResultsDto, PublishResultsResponse};

use crate::middleware::auth::AuthUser;
use crate::modules::results::service::ResultService;
use crate::state::AppState;
use crate::validator::JsonBody;

#[utoipa::path(
    post,
    path = "/api/exams/{exam_id}/results",
    params(
        ("exam_id" = Uuid, Path, description = "Exam ID")
    ),
    request_body = PublishResultsDto,
    responses(
        (status = 201, description = "Results published; returns the full ledger", body = PublishResultsResponse),
        (status = 400, description = "No results provided"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not a teacher of the exam's class"),
        (status = 404, description = "Exam or student not found")
    ),
    tag = "Results",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, body))]
pub async fn publish_results(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(exam_id): Path<ExamId>,
    body: Result<JsonBody<PublishResultsDto>, DomainError>,
) -> Result<(StatusCode, Json<PublishResultsResponse>), AppError> {
    let caller = auth_user.user_id()?;
    let payload = JsonBody::payload(body);
    let ledger = ResultService::publish_results(state.store.as_ref(), caller, exam_id, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(PublishResultsResponse {
            message: "Exam results published successfully!".to_string(),
            ledger,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/exams/{exam_id}/results",
    params(
        ("exam_id" = Uuid, Path, description = "Exam ID")
    ),
    responses(
        (status = 200, description = "Published results", body = ExamResultsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No results published for this exam yet")
    ),
    tag = "Results",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_results(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(exam_id): Path<ExamId>,
) -> Result<Json<ExamResultsResponse>, AppError> {
    let results = ResultService::get_results(state.store.as_ref(), exam_id).await?;

    Ok(Json(results))
}
