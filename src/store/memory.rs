//! In-memory store used by tests and `STORE_BACKEND=memory`.
//!
//! All tables sit behind one `RwLock`; each trait method takes the lock once,
//! so every operation is atomic with respect to the others.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::instrument;

use classbook_core::DomainError;
use classbook_models::classes::{Class, CreateClassDto};
use classbook_models::exams::Exam;
use classbook_models::ids::{ClassId, ExamId, ExamResultId, MembershipId, SubjectId, UserId};
use classbook_models::memberships::{ClassMember, Membership, MembershipRole};
use classbook_models::results::{LedgerEntry, StudentResult};
use classbook_models::subjects::Subject;
use classbook_models::users::{CreateUserDto, User};

use super::{MembershipStore, RegistryStore, ResultLedger, UserDirectory};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    classes: HashMap<ClassId, Class>,
    // Vec keeps insertion order for listings.
    memberships: Vec<Membership>,
    subjects: Vec<Subject>,
    exams: Vec<Exam>,
    ledgers: HashMap<ExamId, LedgerEntry>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for InMemoryStore {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn create_user(&self, dto: CreateUserDto) -> Result<User, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == dto.email) {
            return Err(DomainError::validation("A user with this email already exists"));
        }

        let user = User {
            id: UserId::new(),
            email: dto.email,
            first_name: dto.first_name,
            last_name: dto.last_name,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl MembershipStore for InMemoryStore {
    async fn list_classes_for(&self, user: UserId) -> Result<Vec<Class>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .memberships
            .iter()
            .filter(|m| m.user_id == user)
            .filter_map(|m| tables.classes.get(&m.class_id).cloned())
            .collect())
    }

    async fn has_role(
        &self,
        user: UserId,
        class: ClassId,
        role: MembershipRole,
    ) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .memberships
            .iter()
            .any(|m| m.user_id == user && m.class_id == class && m.role == role))
    }

    #[instrument(skip(self))]
    async fn enroll(
        &self,
        user: UserId,
        class: ClassId,
        role: MembershipRole,
    ) -> Result<Membership, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user) {
            return Err(DomainError::not_found("User"));
        }
        if !tables.classes.contains_key(&class) {
            return Err(DomainError::not_found("Class"));
        }
        if tables
            .memberships
            .iter()
            .any(|m| m.user_id == user && m.class_id == class)
        {
            return Err(DomainError::DuplicateMembership);
        }

        let membership = Membership {
            id: MembershipId::new(),
            user_id: user,
            class_id: class,
            role,
            created_at: Utc::now(),
        };
        tables.memberships.push(membership.clone());
        Ok(membership)
    }

    async fn list_members(&self, class: ClassId) -> Result<Vec<ClassMember>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .memberships
            .iter()
            .filter(|m| m.class_id == class)
            .filter_map(|m| {
                tables.users.get(&m.user_id).map(|user| ClassMember {
                    membership: m.clone(),
                    user: user.clone(),
                })
            })
            .collect())
    }
}

#[async_trait]
impl RegistryStore for InMemoryStore {
    #[instrument(skip(self))]
    async fn create_class(&self, dto: CreateClassDto) -> Result<Class, DomainError> {
        let now = Utc::now();
        let class = Class {
            id: ClassId::new(),
            name: dto.name,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .write()
            .await
            .classes
            .insert(class.id, class.clone());
        Ok(class)
    }

    async fn get_class(&self, id: ClassId) -> Result<Option<Class>, DomainError> {
        Ok(self.tables.read().await.classes.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn add_subject(
        &self,
        class: ClassId,
        name: &str,
        description: &str,
    ) -> Result<Subject, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.classes.contains_key(&class) {
            return Err(DomainError::not_found("Class"));
        }

        let now = Utc::now();
        let subject = Subject {
            id: SubjectId::new(),
            name: name.to_string(),
            description: description.to_string(),
            class_id: class,
            created_at: now,
            updated_at: now,
        };
        tables.subjects.push(subject.clone());
        Ok(subject)
    }

    async fn get_subject(&self, id: SubjectId) -> Result<Option<Subject>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.subjects.iter().find(|s| s.id == id).cloned())
    }

    async fn list_subjects(&self, class: ClassId) -> Result<Vec<Subject>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .subjects
            .iter()
            .filter(|s| s.class_id == class)
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    async fn add_exam(
        &self,
        class: ClassId,
        subject: SubjectId,
        name: &str,
        description: &str,
    ) -> Result<Exam, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.classes.contains_key(&class) {
            return Err(DomainError::not_found("Class"));
        }
        if !tables.subjects.iter().any(|s| s.id == subject) {
            return Err(DomainError::not_found("Subject"));
        }

        let now = Utc::now();
        let exam = Exam {
            id: ExamId::new(),
            name: name.to_string(),
            description: description.to_string(),
            class_id: class,
            subject_id: subject,
            created_at: now,
            updated_at: now,
        };
        tables.exams.push(exam.clone());
        Ok(exam)
    }

    async fn get_exam(&self, id: ExamId) -> Result<Option<Exam>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.exams.iter().find(|e| e.id == id).cloned())
    }

    async fn list_exams(&self, class: ClassId) -> Result<Vec<Exam>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .exams
            .iter()
            .filter(|e| e.class_id == class)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ResultLedger for InMemoryStore {
    #[instrument(skip(self, results), fields(count = results.len()))]
    async fn upsert_results(
        &self,
        exam: ExamId,
        results: BTreeMap<UserId, StudentResult>,
    ) -> Result<LedgerEntry, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.exams.iter().any(|e| e.id == exam) {
            return Err(DomainError::not_found("Exam"));
        }
        if let Some(missing) = results.keys().find(|id| !tables.users.contains_key(*id)) {
            return Err(DomainError::not_found(format!("Student {missing}")));
        }

        let now = Utc::now();
        let entry = tables.ledgers.entry(exam).or_insert_with(|| LedgerEntry {
            id: ExamResultId::new(),
            exam_id: exam,
            results: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        });
        entry.results.extend(results);
        entry.updated_at = now;
        Ok(entry.clone())
    }

    async fn get_ledger(&self, exam: ExamId) -> Result<Option<LedgerEntry>, DomainError> {
        Ok(self.tables.read().await.ledgers.get(&exam).cloned())
    }
}
