use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use classbook_models::classes::{Class, ClassDetail, ClassListResponse};
use classbook_models::exams::{CreateExamDto, Exam, ExamCreatedResponse, ExamListResponse};
use classbook_models::memberships::{
    ClassMember, ClassMembersResponse, EnrollStudentDto, EnrollmentResponse, Membership,
    MembershipRole,
};
use classbook_models::results::{
    ExamResultsResponse, LedgerEntry, PublishResultsDto, PublishResultsResponse, ResultEntryDto,
    StudentResult,
};
use classbook_models::subjects::{
    CreateSubjectDto, Subject, SubjectCreatedResponse, SubjectListResponse,
};
use classbook_models::users::User;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::classes::controller::list_my_classes,
        crate::modules::classes::controller::get_class,
        crate::modules::memberships::controller::list_members,
        crate::modules::memberships::controller::enroll_student,
        crate::modules::subjects::controller::list_subjects,
        crate::modules::subjects::controller::add_subject,
        crate::modules::exams::controller::list_exams,
        crate::modules::exams::controller::create_exam,
        crate::modules::results::controller::publish_results,
        crate::modules::results::controller::get_results,
    ),
    components(
        schemas(
            User,
            Class,
            ClassDetail,
            ClassListResponse,
            Membership,
            MembershipRole,
            ClassMember,
            ClassMembersResponse,
            EnrollStudentDto,
            EnrollmentResponse,
            Subject,
            CreateSubjectDto,
            SubjectCreatedResponse,
            SubjectListResponse,
            Exam,
            CreateExamDto,
            ExamCreatedResponse,
            ExamListResponse,
            StudentResult,
            ResultEntryDto,
            PublishResultsDto,
            LedgerEntry,
            PublishResultsResponse,
            ExamResultsResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Classes", description = "Classes the caller belongs to"),
        (name = "Memberships", description = "Class rosters and student enrollment"),
        (name = "Subjects", description = "Subjects taught within a class"),
        (name = "Exams", description = "Exams per class and subject"),
        (name = "Results", description = "Exam result publication")
    ),
    info(
        title = "Classbook API",
        version = "0.1.0",
        description = "Class rosters, subjects, exams and exam results for teachers and students.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
