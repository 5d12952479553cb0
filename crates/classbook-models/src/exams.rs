//! Exam models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{ClassId, ExamId, SubjectId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Exam {
    pub id: ExamId,
    pub name: String,
    pub description: String,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateExamDto {
    #[serde(default)]
    #[validate(length(max = 100, message = "Exam name must be at most 100 characters."))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExamCreatedResponse {
    pub message: String,
    pub exam: Exam,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExamListResponse {
    pub exams: Vec<Exam>,
}
