//! Subject models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{ClassId, SubjectId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub description: String,
    pub class_id: ClassId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An absent `name` deserializes as empty and is rejected by the service.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateSubjectDto {
    #[serde(default)]
    #[validate(length(max = 100, message = "Subject name must be at most 100 characters."))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubjectCreatedResponse {
    pub message: String,
    pub subject: Subject,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubjectListResponse {
    pub subjects: Vec<Subject>,
}
