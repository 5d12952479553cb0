//! Exam result ledger models.
//!
//! Each exam has at most one ledger entry mapping student ids to the marks
//! and optional grade they received.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{ExamId, ExamResultId, UserId};

/// Marks and grade stored for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentResult {
    pub marks: f64,
    pub grade: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ResultEntryDto {
    pub student_id: UserId,
    pub marks: f64,
    #[serde(default)]
    #[validate(length(max = 16, message = "Grade must be at most 16 characters."))]
    pub grade: Option<String>,
}

impl ResultEntryDto {
    pub fn into_result(self) -> (UserId, StudentResult) {
        (
            self.student_id,
            StudentResult {
                marks: self.marks,
                grade: self.grade,
            },
        )
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct PublishResultsDto {
    #[serde(default)]
    #[validate(nested)]
    pub results: Vec<ResultEntryDto>,
}

/// The full result set published for an exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LedgerEntry {
    pub id: ExamResultId,
    pub exam_id: ExamId,
    #[schema(value_type = Object)]
    pub results: BTreeMap<UserId, StudentResult>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublishResultsResponse {
    pub message: String,
    pub ledger: LedgerEntry,
}

/// Published results presented with the exam and subject they belong to.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExamResultsResponse {
    pub exam: String,
    pub subject: String,
    #[schema(value_type = Object)]
    pub results: BTreeMap<UserId, StudentResult>,
}
