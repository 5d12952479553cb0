use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use classbook_core::{AppError, DomainError};
use classbook_models::exams::{CreateExamDto, ExamCreatedResponse, ExamListResponse};
use classbook_models::ids::{ClassId, SubjectId};

use crate::middleware::auth::AuthUser;
use crate::modules::exams::service::ExamService;
use crate::state::AppState;
use crate::validator::JsonBody;

#[utoipa::path(
    get,
    path = "/api/classes/{class_id}/exams",
    params(
        ("class_id" = Uuid, Path, description = "Class ID")
    ),
    responses(
        (status = 200, description = "Exams defined for the class", body = ExamListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Class not found")
    ),
    tag = "Exams",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_exams(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(class_id): Path<ClassId>,
) -> Result<Json<ExamListResponse>, AppError> {
    let exams = ExamService::list_exams(state.store.as_ref(), class_id).await?;

    Ok(Json(ExamListResponse { exams }))
}

#[utoipa::path(
    post,
    path = "/api/classes/{class_id}/subjects/{subject_id}/exams",
    params(
        ("class_id" = Uuid, Path, description = "Class ID"),
        ("subject_id" = Uuid, Path, description = "Subject ID")
    ),
    request_body = CreateExamDto,
    responses(
        (status = 201, description = "Exam created", body = ExamCreatedResponse),
        (status = 400, description = "Missing exam name or subject of another class"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not a teacher of this class"),
        (status = 404, description = "Class or subject not found")
    ),
    tag = "Exams",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_exam(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((class_id, subject_id)): Path<(ClassId, SubjectId)>,
    body: Result<JsonBody<CreateExamDto>, DomainError>,
) -> Result<(StatusCode, Json<ExamCreatedResponse>), AppError> {
    let caller = auth_user.user_id()?;
    let payload = JsonBody::payload(body);
    let exam =
        ExamService::create_exam(state.store.as_ref(), caller, class_id, subject_id, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ExamCreatedResponse {
            message: "Exam created successfully.".to_string(),
            exam,
        }),
    ))
}
