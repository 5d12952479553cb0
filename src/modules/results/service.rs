use std::collections::BTreeMap;
use tracing::{info, instrument};

use classbook_core::DomainError;
use classbook_models::ids::{ExamId, UserId};
use classbook_models::memberships::MembershipRole;
use classbook_models::results::{ExamResultsResponse, LedgerEntry, PublishResultsDto, StudentResult};

use crate::metrics::track_results_published;
use crate::store::ClassroomStore;
use crate::utils::auth_helpers::require_class_role;
use crate::validator::{Payload, validate};

pub struct ResultService;

impl ResultService {
    /// Records marks for the named students on the exam's ledger entry.
    ///
    /// Entries are merged into whatever was published before. When a
    /// student appears more than once the last occurrence is kept. Every
    /// student is resolved before anything is written, so an unknown id
    /// leaves the ledger untouched.
    #[instrument(skip(store, payload))]
    pub async fn publish_results(
        store: &dyn ClassroomStore,
        caller: UserId,
        exam_id: ExamId,
        payload: Payload<PublishResultsDto>,
    ) -> Result<LedgerEntry, DomainError> {
        let exam = store
            .get_exam(exam_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Exam"))?;

        require_class_role(
            store,
            caller,
            exam.class_id,
            MembershipRole::Teacher,
            "publish results for this exam",
        )
        .await?;
        let dto = payload?;

        if dto.results.is_empty() {
            return Err(DomainError::validation("No results data provided."));
        }
        validate(&dto)?;

        let submitted = dto.results.len();
        let results: BTreeMap<UserId, StudentResult> = dto
            .results
            .into_iter()
            .map(|entry| entry.into_result())
            .collect();

        for student_id in results.keys() {
            if store.find_user(*student_id).await?.is_none() {
                return Err(DomainError::not_found("Student"));
            }
        }

        let ledger = store.upsert_results(exam.id, results).await?;

        info!(exam_id = %exam.id, submitted, stored = ledger.results.len(), "Exam results published");
        track_results_published(submitted);

        Ok(ledger)
    }

    /// Published results with the exam and subject names.
    ///
    /// An unknown exam, an exam without a ledger entry and an empty ledger
    /// entry all yield [`DomainError::NoResults`].
    #[instrument(skip(store))]
    pub async fn get_results(
        store: &dyn ClassroomStore,
        exam_id: ExamId,
    ) -> Result<ExamResultsResponse, DomainError> {
        let Some(exam) = store.get_exam(exam_id).await? else {
            return Err(DomainError::NoResults);
        };

        let ledger = store
            .get_ledger(exam.id)
            .await?
            .filter(|ledger| !ledger.results.is_empty())
            .ok_or(DomainError::NoResults)?;

        let subject = store
            .get_subject(exam.subject_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Subject"))?;

        Ok(ExamResultsResponse {
            exam: exam.name,
            subject: subject.name,
            results: ledger.results,
        })
    }
}
