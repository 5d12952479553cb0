//! Class membership models.
//!
//! A membership ties one user to one class with exactly one role. The
//! `(user_id, class_id)` pair is unique.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;

use crate::ids::{ClassId, MembershipId, UserId};
use crate::users::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "membership_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MembershipRole {
    Teacher,
    Student,
}

impl MembershipRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }
}

impl fmt::Display for MembershipRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Membership {
    pub id: MembershipId,
    pub user_id: UserId,
    pub class_id: ClassId,
    pub role: MembershipRole,
    pub created_at: DateTime<Utc>,
}

/// A membership joined with the member's user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClassMember {
    pub membership: Membership,
    pub user: User,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClassMembersResponse {
    pub members: Vec<ClassMember>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct EnrollStudentDto {
    pub student_id: Option<UserId>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentResponse {
    pub message: String,
    pub membership: Membership,
}
