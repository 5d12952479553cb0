use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use classbook_core::{AppError, DomainError};
use classbook_models::ids::ClassId;
use classbook_models::subjects::{CreateSubjectDto, SubjectCreatedResponse, SubjectListResponse};

use crate::middleware::auth::AuthUser;
use crate::modules::subjects::service::SubjectService;
use crate::state::AppState;
use crate::validator::JsonBody;

#[utoipa::path(
    get,
    path = "/api/classes/{class_id}/subjects",
    params(
        ("class_id" = Uuid, Path, description = "Class ID")
    ),
    responses(
        (status = 200, description = "Subjects taught in the class", body = SubjectListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Class not found")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_subjects(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(class_id): Path<ClassId>,
) -> Result<Json<SubjectListResponse>, AppError> {
    let subjects = SubjectService::list_subjects(state.store.as_ref(), class_id).await?;

    Ok(Json(SubjectListResponse { subjects }))
}

#[utoipa::path(
    post,
    path = "/api/classes/{class_id}/subjects",
    params(
        ("class_id" = Uuid, Path, description = "Class ID")
    ),
    request_body = CreateSubjectDto,
    responses(
        (status = 201, description = "Subject added to the class", body = SubjectCreatedResponse),
        (status = 400, description = "Missing subject name"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not a teacher of this class"),
        (status = 404, description = "Class not found")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn add_subject(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(class_id): Path<ClassId>,
    body: Result<JsonBody<CreateSubjectDto>, DomainError>,
) -> Result<(StatusCode, Json<SubjectCreatedResponse>), AppError> {
    let caller = auth_user.user_id()?;
    let payload = JsonBody::payload(body);
    let subject = SubjectService::add_subject(state.store.as_ref(), caller, class_id, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubjectCreatedResponse {
            message: "Subject added successfully to the class.".to_string(),
            subject,
        }),
    ))
}
