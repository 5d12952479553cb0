//! Class models and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::ClassId;
use crate::subjects::Subject;
use crate::users::User;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Classes are created by administrators, outside the HTTP API.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateClassDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClassListResponse {
    pub classes: Vec<Class>,
}

/// A class with its roster and subjects.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClassDetail {
    pub class: Class,
    pub teachers: Vec<User>,
    pub students: Vec<User>,
    pub subjects: Vec<Subject>,
}
