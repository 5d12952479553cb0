use tracing::instrument;

use classbook_core::DomainError;
use classbook_models::classes::{Class, ClassDetail};
use classbook_models::ids::{ClassId, UserId};
use classbook_models::memberships::MembershipRole;

use crate::store::ClassroomStore;

pub struct ClassService;

impl ClassService {
    /// Classes where `caller` is a teacher or a student.
    #[instrument(skip(store))]
    pub async fn list_my_classes(
        store: &dyn ClassroomStore,
        caller: UserId,
    ) -> Result<Vec<Class>, DomainError> {
        store.list_classes_for(caller).await
    }

    pub async fn get_class(
        store: &dyn ClassroomStore,
        class_id: ClassId,
    ) -> Result<Class, DomainError> {
        store
            .get_class(class_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Class"))
    }

    /// The class with its roster split by role, plus its subjects.
    #[instrument(skip(store))]
    pub async fn get_class_detail(
        store: &dyn ClassroomStore,
        class_id: ClassId,
    ) -> Result<ClassDetail, DomainError> {
        let class = Self::get_class(store, class_id).await?;

        let (teachers, students): (Vec<_>, Vec<_>) = store
            .list_members(class_id)
            .await?
            .into_iter()
            .partition(|m| m.membership.role == MembershipRole::Teacher);

        Ok(ClassDetail {
            class,
            teachers: teachers.into_iter().map(|m| m.user).collect(),
            students: students.into_iter().map(|m| m.user).collect(),
            subjects: store.list_subjects(class_id).await?,
        })
    }
}
