use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use classbook_core::AppError;
use classbook_models::classes::{ClassDetail, ClassListResponse};
use classbook_models::ids::ClassId;

use crate::middleware::auth::AuthUser;
use crate::modules::classes::service::ClassService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/classes",
    responses(
        (status = 200, description = "Classes the caller teaches or attends", body = ClassListResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_my_classes(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ClassListResponse>, AppError> {
    let caller = auth_user.user_id()?;
    let classes = ClassService::list_my_classes(state.store.as_ref(), caller).await?;

    Ok(Json(ClassListResponse { classes }))
}

#[utoipa::path(
    get,
    path = "/api/classes/{class_id}",
    params(
        ("class_id" = Uuid, Path, description = "Class ID")
    ),
    responses(
        (status = 200, description = "Class with teachers, students and subjects", body = ClassDetail),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Class not found")
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_class(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(class_id): Path<ClassId>,
) -> Result<Json<ClassDetail>, AppError> {
    let detail = ClassService::get_class_detail(state.store.as_ref(), class_id).await?;

    Ok(Json(detail))
}
