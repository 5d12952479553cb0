use tracing::{info, instrument};

use classbook_core::DomainError;
use classbook_models::exams::{CreateExamDto, Exam};
use classbook_models::ids::{ClassId, SubjectId, UserId};
use classbook_models::memberships::MembershipRole;

use crate::metrics::track_exam_created;
use crate::modules::classes::service::ClassService;
use crate::store::ClassroomStore;
use crate::utils::auth_helpers::require_class_role;
use crate::validator::{Payload, validate};

pub struct ExamService;

impl ExamService {
    #[instrument(skip(store))]
    pub async fn list_exams(
        store: &dyn ClassroomStore,
        class_id: ClassId,
    ) -> Result<Vec<Exam>, DomainError> {
        ClassService::get_class(store, class_id).await?;
        store.list_exams(class_id).await
    }

    /// Creates an exam for `subject_id` within `class_id`.
    ///
    /// The subject must be one of the class's own subjects.
    #[instrument(skip(store))]
    pub async fn create_exam(
        store: &dyn ClassroomStore,
        caller: UserId,
        class_id: ClassId,
        subject_id: SubjectId,
        payload: Payload<CreateExamDto>,
    ) -> Result<Exam, DomainError> {
        ClassService::get_class(store, class_id).await?;
        let subject = store
            .get_subject(subject_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Subject"))?;

        require_class_role(
            store,
            caller,
            class_id,
            MembershipRole::Teacher,
            "create an exam for this class",
        )
        .await?;
        let dto = payload?;

        if subject.class_id != class_id {
            return Err(DomainError::validation(
                "Subject does not belong to this class.",
            ));
        }

        let name = dto.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Exam name is required."));
        }
        validate(&dto)?;

        let exam = store
            .add_exam(
                class_id,
                subject.id,
                name,
                dto.description.as_deref().unwrap_or_default(),
            )
            .await?;

        info!(exam_id = %exam.id, subject_id = %subject.id, "Exam created");
        track_exam_created();

        Ok(exam)
    }
}
