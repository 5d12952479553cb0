//! Storage seams for the classroom workflow.
//!
//! Services depend on these traits rather than on a database handle, so the
//! same workflow runs against PostgreSQL ([`PgStore`]) in production and
//! against [`InMemoryStore`] in tests and local runs.
//!
//! Every method is a single atomic operation. Uniqueness of
//! `(user, class)` memberships and of one ledger entry per exam is enforced
//! by the store, not by callers.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::collections::BTreeMap;

use classbook_core::DomainError;
use classbook_models::classes::{Class, CreateClassDto};
use classbook_models::exams::Exam;
use classbook_models::ids::{ClassId, ExamId, SubjectId, UserId};
use classbook_models::memberships::{ClassMember, Membership, MembershipRole};
use classbook_models::results::{LedgerEntry, StudentResult};
use classbook_models::subjects::Subject;
use classbook_models::users::{CreateUserDto, User};

pub use memory::InMemoryStore;
pub use postgres::PgStore;

/// Resolves user ids handed out by the identity provider.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Registers a user. Only test fixtures call this. The admin CLI writes
    /// users with its own SQL.
    async fn create_user(&self, dto: CreateUserDto) -> Result<User, DomainError>;
}

/// The role-tagged relation between users and classes.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Classes where `user` holds any role, in enrollment order.
    async fn list_classes_for(&self, user: UserId) -> Result<Vec<Class>, DomainError>;

    async fn has_role(
        &self,
        user: UserId,
        class: ClassId,
        role: MembershipRole,
    ) -> Result<bool, DomainError>;

    /// Creates the membership if the pair has none.
    ///
    /// Fails with [`DomainError::DuplicateMembership`] when `(user, class)`
    /// already has a membership of any role.
    async fn enroll(
        &self,
        user: UserId,
        class: ClassId,
        role: MembershipRole,
    ) -> Result<Membership, DomainError>;

    /// Members of `class` in insertion order.
    async fn list_members(&self, class: ClassId) -> Result<Vec<ClassMember>, DomainError>;
}

/// Classes, the subjects taught in them and their exams.
#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// Fixture-only, like [`UserDirectory::create_user`].
    async fn create_class(&self, dto: CreateClassDto) -> Result<Class, DomainError>;

    async fn get_class(&self, id: ClassId) -> Result<Option<Class>, DomainError>;

    async fn add_subject(
        &self,
        class: ClassId,
        name: &str,
        description: &str,
    ) -> Result<Subject, DomainError>;

    async fn get_subject(&self, id: SubjectId) -> Result<Option<Subject>, DomainError>;

    async fn list_subjects(&self, class: ClassId) -> Result<Vec<Subject>, DomainError>;

    async fn add_exam(
        &self,
        class: ClassId,
        subject: SubjectId,
        name: &str,
        description: &str,
    ) -> Result<Exam, DomainError>;

    async fn get_exam(&self, id: ExamId) -> Result<Option<Exam>, DomainError>;

    async fn list_exams(&self, class: ClassId) -> Result<Vec<Exam>, DomainError>;
}

/// One result set per exam.
#[async_trait]
pub trait ResultLedger: Send + Sync {
    /// Gets or creates the exam's ledger entry and upserts `results` into it.
    ///
    /// Students not named in `results` keep what they had. Returns the
    /// full entry after the write.
    async fn upsert_results(
        &self,
        exam: ExamId,
        results: BTreeMap<UserId, StudentResult>,
    ) -> Result<LedgerEntry, DomainError>;

    async fn get_ledger(&self, exam: ExamId) -> Result<Option<LedgerEntry>, DomainError>;
}

/// Everything the API needs from storage.
pub trait ClassroomStore: UserDirectory + MembershipStore + RegistryStore + ResultLedger {}

impl<T> ClassroomStore for T where T: UserDirectory + MembershipStore + RegistryStore + ResultLedger {}
