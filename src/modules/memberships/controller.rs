use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use classbook_core::{AppError, DomainError};
use classbook_models::ids::ClassId;
use classbook_models::memberships::{ClassMembersResponse, EnrollStudentDto, EnrollmentResponse};

use crate::middleware::auth::AuthUser;
use crate::modules::memberships::service::MembershipService;
use crate::state::AppState;
use crate::validator::JsonBody;

#[utoipa::path(
    get,
    path = "/api/classes/{class_id}/members",
    params(
        ("class_id" = Uuid, Path, description = "Class ID")
    ),
    responses(
        (status = 200, description = "Members in enrollment order", body = ClassMembersResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Class not found")
    ),
    tag = "Memberships",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_members(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(class_id): Path<ClassId>,
) -> Result<Json<ClassMembersResponse>, AppError> {
    let members = MembershipService::list_members(state.store.as_ref(), class_id).await?;

    Ok(Json(ClassMembersResponse { members }))
}

#[utoipa::path(
    post,
    path = "/api/classes/{class_id}/students",
    params(
        ("class_id" = Uuid, Path, description = "Class ID")
    ),
    request_body = EnrollStudentDto,
    responses(
        (status = 201, description = "Student added to the class", body = EnrollmentResponse),
        (status = 400, description = "Missing student_id or already enrolled"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not a teacher of this class"),
        (status = 404, description = "Class or student not found")
    ),
    tag = "Memberships",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn enroll_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(class_id): Path<ClassId>,
    body: Result<JsonBody<EnrollStudentDto>, DomainError>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), AppError> {
    let caller = auth_user.user_id()?;
    let payload = JsonBody::payload(body);
    let membership =
        MembershipService::enroll_student(state.store.as_ref(), caller, class_id, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(EnrollmentResponse {
            message: "Student added successfully to the class.".to_string(),
            membership,
        }),
    ))
}
