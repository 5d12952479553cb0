//! PostgreSQL store.
//!
//! Uniqueness is left to the schema: `class_memberships_user_class_key`
//! rejects a second membership for a `(user, class)` pair and
//! `exam_results.exam_id` is unique, so ledger creation is an
//! `INSERT ... ON CONFLICT`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::collections::BTreeMap;
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

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(FromRow)]
struct MemberRow {
    id: MembershipId,
    user_id: UserId,
    class_id: ClassId,
    role: MembershipRole,
    created_at: DateTime<Utc>,
    email: String,
    first_name: String,
    last_name: String,
    user_created_at: DateTime<Utc>,
}

impl From<MemberRow> for ClassMember {
    fn from(row: MemberRow) -> Self {
        ClassMember {
            membership: Membership {
                id: row.id,
                user_id: row.user_id,
                class_id: row.class_id,
                role: row.role,
                created_at: row.created_at,
            },
            user: User {
                id: row.user_id,
                email: row.email,
                first_name: row.first_name,
                last_name: row.last_name,
                created_at: row.user_created_at,
            },
        }
    }
}

#[derive(FromRow)]
struct LedgerRow {
    id: ExamResultId,
    exam_id: ExamId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl UserDirectory for PgStore {
    #[instrument(skip(self))]
    async fn find_user(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, first_name, last_name, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn create_user(&self, dto: CreateUserDto) -> Result<User, DomainError> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (email, first_name, last_name)
               VALUES ($1, $2, $3)
               RETURNING id, email, first_name, last_name, created_at"#,
        )
        .bind(&dto.email)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return DomainError::validation("A user with this email already exists");
            }
            DomainError::from(e)
        })
    }
}

#[async_trait]
impl MembershipStore for PgStore {
    #[instrument(skip(self))]
    async fn list_classes_for(&self, user: UserId) -> Result<Vec<Class>, DomainError> {
        let classes = sqlx::query_as::<_, Class>(
            r#"SELECT c.id, c.name, c.created_at, c.updated_at
               FROM classes c
               JOIN class_memberships m ON m.class_id = c.id
               WHERE m.user_id = $1
               ORDER BY m.seq"#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await?;

        Ok(classes)
    }

    #[instrument(skip(self))]
    async fn has_role(
        &self,
        user: UserId,
        class: ClassId,
        role: MembershipRole,
    ) -> Result<bool, DomainError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(
                   SELECT 1 FROM class_memberships
                   WHERE user_id = $1 AND class_id = $2 AND role = $3
               )"#,
        )
        .bind(user)
        .bind(class)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn enroll(
        &self,
        user: UserId,
        class: ClassId,
        role: MembershipRole,
    ) -> Result<Membership, DomainError> {
        sqlx::query_as::<_, Membership>(
            r#"INSERT INTO class_memberships (user_id, class_id, role)
               VALUES ($1, $2, $3)
               RETURNING id, user_id, class_id, role, created_at"#,
        )
        .bind(user)
        .bind(class)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return DomainError::DuplicateMembership;
                }
                if db_err.is_foreign_key_violation() {
                    return DomainError::not_found("User or class");
                }
            }
            DomainError::from(e)
        })
    }

    #[instrument(skip(self))]
    async fn list_members(&self, class: ClassId) -> Result<Vec<ClassMember>, DomainError> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"SELECT m.id, m.user_id, m.class_id, m.role, m.created_at,
                      u.email, u.first_name, u.last_name, u.created_at AS user_created_at
               FROM class_memberships m
               JOIN users u ON u.id = m.user_id
               WHERE m.class_id = $1
               ORDER BY m.seq"#,
        )
        .bind(class)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ClassMember::from).collect())
    }
}

#[async_trait]
impl RegistryStore for PgStore {
    #[instrument(skip(self))]
    async fn create_class(&self, dto: CreateClassDto) -> Result<Class, DomainError> {
        let class = sqlx::query_as::<_, Class>(
            r#"INSERT INTO classes (name)
               VALUES ($1)
               RETURNING id, name, created_at, updated_at"#,
        )
        .bind(&dto.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(class)
    }

    #[instrument(skip(self))]
    async fn get_class(&self, id: ClassId) -> Result<Option<Class>, DomainError> {
        let class = sqlx::query_as::<_, Class>(
            "SELECT id, name, created_at, updated_at FROM classes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(class)
    }

    #[instrument(skip(self))]
    async fn add_subject(
        &self,
        class: ClassId,
        name: &str,
        description: &str,
    ) -> Result<Subject, DomainError> {
        let subject = sqlx::query_as::<_, Subject>(
            r#"INSERT INTO subjects (name, description, class_id)
               VALUES ($1, $2, $3)
               RETURNING id, name, description, class_id, created_at, updated_at"#,
        )
        .bind(name)
        .bind(description)
        .bind(class)
        .fetch_one(&self.pool)
        .await?;

        Ok(subject)
    }

    #[instrument(skip(self))]
    async fn get_subject(&self, id: SubjectId) -> Result<Option<Subject>, DomainError> {
        let subject = sqlx::query_as::<_, Subject>(
            r#"SELECT id, name, description, class_id, created_at, updated_at
               FROM subjects WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(subject)
    }

    #[instrument(skip(self))]
    async fn list_subjects(&self, class: ClassId) -> Result<Vec<Subject>, DomainError> {
        let subjects = sqlx::query_as::<_, Subject>(
            r#"SELECT id, name, description, class_id, created_at, updated_at
               FROM subjects WHERE class_id = $1
               ORDER BY created_at"#,
        )
        .bind(class)
        .fetch_all(&self.pool)
        .await?;

        Ok(subjects)
    }

    #[instrument(skip(self))]
    async fn add_exam(
        &self,
        class: ClassId,
        subject: SubjectId,
        name: &str,
        description: &str,
    ) -> Result<Exam, DomainError> {
        let exam = sqlx::query_as::<_, Exam>(
            r#"INSERT INTO exams (name, description, class_id, subject_id)
               VALUES ($1, $2, $3, $4)
               RETURNING id, name, description, class_id, subject_id, created_at, updated_at"#,
        )
        .bind(name)
        .bind(description)
        .bind(class)
        .bind(subject)
        .fetch_one(&self.pool)
        .await?;

        Ok(exam)
    }

    #[instrument(skip(self))]
    async fn get_exam(&self, id: ExamId) -> Result<Option<Exam>, DomainError> {
        let exam = sqlx::query_as::<_, Exam>(
            r#"SELECT id, name, description, class_id, subject_id, created_at, updated_at
               FROM exams WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(exam)
    }

    #[instrument(skip(self))]
    async fn list_exams(&self, class: ClassId) -> Result<Vec<Exam>, DomainError> {
        let exams = sqlx::query_as::<_, Exam>(
            r#"SELECT id, name, description, class_id, subject_id, created_at, updated_at
               FROM exams WHERE class_id = $1
               ORDER BY created_at"#,
        )
        .bind(class)
        .fetch_all(&self.pool)
        .await?;

        Ok(exams)
    }
}

impl PgStore {
    async fn load_entries(
        &self,
        ledger_id: ExamResultId,
    ) -> Result<BTreeMap<UserId, StudentResult>, DomainError> {
        let rows = sqlx::query_as::<_, (UserId, f64, Option<String>)>(
            r#"SELECT student_id, marks, grade
               FROM exam_result_entries
               WHERE exam_result_id = $1"#,
        )
        .bind(ledger_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(student, marks, grade)| (student, StudentResult { marks, grade }))
            .collect())
    }
}

#[async_trait]
impl ResultLedger for PgStore {
    #[instrument(skip(self, results), fields(count = results.len()))]
    async fn upsert_results(
        &self,
        exam: ExamId,
        results: BTreeMap<UserId, StudentResult>,
    ) -> Result<LedgerEntry, DomainError> {
        let mut tx = self.pool.begin().await?;

        let ledger = sqlx::query_as::<_, LedgerRow>(
            r#"INSERT INTO exam_results (exam_id)
               VALUES ($1)
               ON CONFLICT (exam_id) DO UPDATE SET updated_at = NOW()
               RETURNING id, exam_id, created_at, updated_at"#,
        )
        .bind(exam)
        .fetch_one(&mut *tx)
        .await?;

        for (student, result) in &results {
            sqlx::query(
                r#"INSERT INTO exam_result_entries (exam_result_id, student_id, marks, grade)
                   VALUES ($1, $2, $3, $4)
                   ON CONFLICT (exam_result_id, student_id)
                   DO UPDATE SET marks = EXCLUDED.marks,
                                 grade = EXCLUDED.grade,
                                 updated_at = NOW()"#,
            )
            .bind(ledger.id)
            .bind(*student)
            .bind(result.marks)
            .bind(result.grade.as_deref())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(LedgerEntry {
            id: ledger.id,
            exam_id: ledger.exam_id,
            results: self.load_entries(ledger.id).await?,
            created_at: ledger.created_at,
            updated_at: ledger.updated_at,
        })
    }

    #[instrument(skip(self))]
    async fn get_ledger(&self, exam: ExamId) -> Result<Option<LedgerEntry>, DomainError> {
        let Some(ledger) = sqlx::query_as::<_, LedgerRow>(
            "SELECT id, exam_id, created_at, updated_at FROM exam_results WHERE exam_id = $1",
        )
        .bind(exam)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        Ok(Some(LedgerEntry {
            id: ledger.id,
            exam_id: ledger.exam_id,
            results: self.load_entries(ledger.id).await?,
            created_at: ledger.created_at,
            updated_at: ledger.updated_at,
        }))
    }
}
