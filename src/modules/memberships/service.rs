use tracing::{info, instrument};

use classbook_core::DomainError;
use classbook_models::ids::{ClassId, UserId};
use classbook_models::memberships::{ClassMember, EnrollStudentDto, Membership, MembershipRole};

use crate::metrics::track_student_enrolled;
use crate::modules::classes::service::ClassService;
use crate::store::ClassroomStore;
use crate::utils::auth_helpers::require_class_role;
use crate::validator::Payload;

pub struct MembershipService;

impl MembershipService {
    #[instrument(skip(store))]
    pub async fn list_members(
        store: &dyn ClassroomStore,
        class_id: ClassId,
    ) -> Result<Vec<ClassMember>, DomainError> {
        ClassService::get_class(store, class_id).await?;
        store.list_members(class_id).await
    }

    /// Adds the payload's `student_id` to the class as a student.
    ///
    /// Only a teacher of the class may enroll. A user who already has a
    /// membership in the class, as teacher or student, is rejected.
    #[instrument(skip(store))]
    pub async fn enroll_student(
        store: &dyn ClassroomStore,
        caller: UserId,
        class_id: ClassId,
        payload: Payload<EnrollStudentDto>,
    ) -> Result<Membership, DomainError> {
        ClassService::get_class(store, class_id).await?;
        require_class_role(
            store,
            caller,
            class_id,
            MembershipRole::Teacher,
            "add students to this class",
        )
        .await?;

        let student_id = payload?
            .student_id
            .ok_or_else(|| DomainError::validation("Student ID is required."))?;

        let student = store
            .find_user(student_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Student"))?;

        let membership = store
            .enroll(student.id, class_id, MembershipRole::Student)
            .await?;

        info!(student_id = %student.id, class_id = %class_id, "Student enrolled");
        track_student_enrolled();

        Ok(membership)
    }
}
