use tracing::warn;

use classbook_core::DomainError;
use classbook_models::ids::{ClassId, UserId};
use classbook_models::memberships::MembershipRole;

use crate::metrics::track_authorization_denied;
use crate::store::MembershipStore;

/// Whether `caller` holds `role` in `class`.
pub async fn authorize<S>(
    store: &S,
    caller: UserId,
    class: ClassId,
    role: MembershipRole,
) -> Result<bool, DomainError>
where
    S: MembershipStore + ?Sized,
{
    store.has_role(caller, class, role).await
}

/// Fails with [`DomainError::Unauthorized`] unless `caller` holds `role` in
/// `class`. `action` completes "You are not authorized to ...".
pub async fn require_class_role<S>(
    store: &S,
    caller: UserId,
    class: ClassId,
    role: MembershipRole,
    action: &str,
) -> Result<(), DomainError>
where
    S: MembershipStore + ?Sized,
{
    if authorize(store, caller, class, role).await? {
        return Ok(());
    }

    warn!(%caller, %class, %role, "Authorization denied");
    track_authorization_denied(role.as_str());
    Err(DomainError::unauthorized(format!(
        "You are not authorized to {action}."
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryStore, RegistryStore, UserDirectory};
    use classbook_models::classes::CreateClassDto;
    use classbook_models::users::CreateUserDto;

    #[tokio::test]
    async fn test_require_class_role() {
        let store = InMemoryStore::new();
        let user = store
            .create_user(CreateUserDto {
                email: "s@example.com".to_string(),
                first_name: "Sam".to_string(),
                last_name: "Student".to_string(),
            })
            .await
            .unwrap();
        let class = store
            .create_class(CreateClassDto {
                name: "C1".to_string(),
            })
            .await
            .unwrap();
        store
            .enroll(user.id, class.id, MembershipRole::Student)
            .await
            .unwrap();

        assert!(
            require_class_role(
                &store,
                user.id,
                class.id,
                MembershipRole::Student,
                "view this class"
            )
            .await
            .is_ok()
        );

        let err = require_class_role(
            &store,
            user.id,
            class.id,
            MembershipRole::Teacher,
            "add subjects to this class",
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "You are not authorized to add subjects to this class."
        );
    }
}
