use tracing::{info, instrument};

use classbook_core::DomainError;
use classbook_models::ids::{ClassId, UserId};
use classbook_models::memberships::MembershipRole;
use classbook_models::subjects::{CreateSubjectDto, Subject};

use crate::metrics::track_subject_created;
use crate::modules::classes::service::ClassService;
use crate::store::ClassroomStore;
use crate::utils::auth_helpers::require_class_role;
use crate::validator::{Payload, validate};

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(store))]
    pub async fn list_subjects(
        store: &dyn ClassroomStore,
        class_id: ClassId,
    ) -> Result<Vec<Subject>, DomainError> {
        ClassService::get_class(store, class_id).await?;
        store.list_subjects(class_id).await
    }

    #[instrument(skip(store))]
    pub async fn add_subject(
        store: &dyn ClassroomStore,
        caller: UserId,
        class_id: ClassId,
        payload: Payload<CreateSubjectDto>,
    ) -> Result<Subject, DomainError> {
        ClassService::get_class(store, class_id).await?;
        require_class_role(
            store,
            caller,
            class_id,
            MembershipRole::Teacher,
            "add subjects to this class",
        )
        .await?;
        let dto = payload?;

        let name = dto.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Subject name is required."));
        }
        validate(&dto)?;

        let subject = store
            .add_subject(class_id, name, dto.description.as_deref().unwrap_or_default())
            .await?;

        info!(subject_id = %subject.id, class_id = %class_id, "Subject created");
        track_subject_created();

        Ok(subject)
    }
}
