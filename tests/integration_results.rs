mod common;

use axum::http::StatusCode;
use classbook::store::{MembershipStore, RegistryStore, ResultLedger};
use classbook_models::classes::Class;
use classbook_models::exams::Exam;
use classbook_models::memberships::MembershipRole;
use common::{TestApp, TestUser, setup_test_app};
use serde_json::json;
use uuid::Uuid;

struct Fixture {
    class: Class,
    exam: Exam,
    teacher: TestUser,
}

async fn setup_exam(app: &TestApp) -> Fixture {
    let (class, teacher) = app.class_with_teacher().await;
    let subject = app.store.add_subject(class.id, "Math", "").await.unwrap();
    let exam = app
        .store
        .add_exam(class.id, subject.id, "Midterm", "")
        .await
        .unwrap();

    Fixture {
        class,
        exam,
        teacher,
    }
}

async fn enrolled_student(app: &TestApp, class: &Class, name: &str) -> TestUser {
    let student = app.create_user(name).await;
    app.store
        .enroll(student.user.id, class.id, MembershipRole::Student)
        .await
        .unwrap();
    student
}

fn results_uri(exam: &Exam) -> String {
    format!("/api/exams/{}/results", exam.id)
}

#[tokio::test]
async fn test_end_to_end_publish_and_read() {
    let app = setup_test_app();
    let class = app.create_class("C1").await;
    let teacher = app.create_user("Tess").await;
    app.store
        .enroll(teacher.user.id, class.id, MembershipRole::Teacher)
        .await
        .unwrap();
    let student = app.create_user("Sam").await;

    let (status, _) = app
        .post(
            &format!("/api/classes/{}/students", class.id),
            &teacher.token,
            json!({ "student_id": student.user.id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .post(
            &format!("/api/classes/{}/subjects", class.id),
            &teacher.token,
            json!({ "name": "Math" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let subject_id = body["subject"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(
            &format!("/api/classes/{}/subjects/{}/exams", class.id, subject_id),
            &teacher.token,
            json!({ "name": "Midterm" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let exam_id = body["exam"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/exams/{}/results", exam_id);

    let (status, body) = app
        .post(
            &uri,
            &teacher.token,
            json!({ "results": [{ "student_id": student.user.id, "marks": 85, "grade": "A" }] }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Exam results published successfully!");

    let (status, body) = app.get(&uri, &student.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exam"], "Midterm");
    assert_eq!(body["subject"], "Math");
    let entry = &body["results"][student.user.id.to_string()];
    assert_eq!(entry["marks"], 85.0);
    assert_eq!(entry["grade"], "A");
}

#[tokio::test]
async fn test_results_not_published_yet() {
    let app = setup_test_app();
    let fixture = setup_exam(&app).await;

    let (status, body) = app
        .get(&results_uri(&fixture.exam), &fixture.teacher.token)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No results published for this exam yet.");
}

#[tokio::test]
async fn test_results_for_unknown_exam() {
    let app = setup_test_app();
    let user = app.create_user("Nobody").await;

    let (status, body) = app
        .get(&format!("/api/exams/{}/results", Uuid::new_v4()), &user.token)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No results published for this exam yet.");
}

#[tokio::test]
async fn test_publish_merges_disjoint_batches() {
    let app = setup_test_app();
    let fixture = setup_exam(&app).await;
    let first = enrolled_student(&app, &fixture.class, "Ada").await;
    let second = enrolled_student(&app, &fixture.class, "Bea").await;
    let uri = results_uri(&fixture.exam);

    app.post(
        &uri,
        &fixture.teacher.token,
        json!({ "results": [{ "student_id": first.user.id, "marks": 70 }] }),
    )
    .await;
    let (status, body) = app
        .post(
            &uri,
            &fixture.teacher.token,
            json!({ "results": [{ "student_id": second.user.id, "marks": 90, "grade": "A+" }] }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let results = body["ledger"]["results"].as_object().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[&first.user.id.to_string()]["marks"], 70.0);
    assert!(results[&first.user.id.to_string()]["grade"].is_null());
    assert_eq!(results[&second.user.id.to_string()]["grade"], "A+");
}

#[tokio::test]
async fn test_republish_overwrites_student_entry() {
    let app = setup_test_app();
    let fixture = setup_exam(&app).await;
    let student = enrolled_student(&app, &fixture.class, "Sam").await;
    let uri = results_uri(&fixture.exam);

    app.post(
        &uri,
        &fixture.teacher.token,
        json!({ "results": [{ "student_id": student.user.id, "marks": 40, "grade": "D" }] }),
    )
    .await;
    app.post(
        &uri,
        &fixture.teacher.token,
        json!({ "results": [{ "student_id": student.user.id, "marks": 75, "grade": "B" }] }),
    )
    .await;

    let ledger = app.store.get_ledger(fixture.exam.id).await.unwrap().unwrap();
    assert_eq!(ledger.results.len(), 1);
    assert_eq!(ledger.results[&student.user.id].marks, 75.0);
    assert_eq!(ledger.results[&student.user.id].grade.as_deref(), Some("B"));
}

#[tokio::test]
async fn test_duplicate_student_in_batch_keeps_last() {
    let app = setup_test_app();
    let fixture = setup_exam(&app).await;
    let student = enrolled_student(&app, &fixture.class, "Sam").await;

    let (status, body) = app
        .post(
            &results_uri(&fixture.exam),
            &fixture.teacher.token,
            json!({ "results": [
                { "student_id": student.user.id, "marks": 10 },
                { "student_id": student.user.id, "marks": 99, "grade": "A" }
            ] }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let entry = &body["ledger"]["results"][student.user.id.to_string()];
    assert_eq!(entry["marks"], 99.0);
    assert_eq!(entry["grade"], "A");
}

#[tokio::test]
async fn test_unknown_student_leaves_ledger_untouched() {
    let app = setup_test_app();
    let fixture = setup_exam(&app).await;
    let student = enrolled_student(&app, &fixture.class, "Sam").await;

    let (status, body) = app
        .post(
            &results_uri(&fixture.exam),
            &fixture.teacher.token,
            json!({ "results": [
                { "student_id": student.user.id, "marks": 80 },
                { "student_id": Uuid::new_v4(), "marks": 50 }
            ] }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Student not found");
    assert!(app.store.get_ledger(fixture.exam.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_publish_requires_results() {
    let app = setup_test_app();
    let fixture = setup_exam(&app).await;
    let uri = results_uri(&fixture.exam);

    let (empty, body) = app
        .post(&uri, &fixture.teacher.token, json!({ "results": [] }))
        .await;
    let (missing, _) = app.post(&uri, &fixture.teacher.token, json!({})).await;

    assert_eq!(empty, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No results data provided.");
    assert_eq!(missing, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_student_cannot_publish() {
    let app = setup_test_app();
    let fixture = setup_exam(&app).await;
    let student = enrolled_student(&app, &fixture.class, "Sam").await;

    let (status, body) = app
        .post(
            &results_uri(&fixture.exam),
            &student.token,
            json!({ "results": [{ "student_id": student.user.id, "marks": 100 }] }),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"],
        "You are not authorized to publish results for this exam."
    );
    assert!(app.store.get_ledger(fixture.exam.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_publish_to_unknown_exam() {
    let app = setup_test_app();
    let teacher = app.create_user("Tess").await;

    let (status, body) = app
        .post(
            &format!("/api/exams/{}/results", Uuid::new_v4()),
            &teacher.token,
            json!({ "results": [{ "student_id": teacher.user.id, "marks": 1 }] }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Exam not found");
}

#[tokio::test]
async fn test_student_with_malformed_results_body_is_forbidden() {
    let app = setup_test_app();
    let fixture = setup_exam(&app).await;
    let student = enrolled_student(&app, &fixture.class, "Sam").await;

    let (status, body) = app
        .post(
            &results_uri(&fixture.exam),
            &student.token,
            json!({ "results": null }),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"],
        "You are not authorized to publish results for this exam."
    );
}

#[tokio::test]
async fn test_teacher_with_malformed_results_body() {
    let app = setup_test_app();
    let fixture = setup_exam(&app).await;

    let (status, _) = app
        .post(
            &results_uri(&fixture.exam),
            &fixture.teacher.token,
            json!({ "results": [{ "student_id": "nope", "marks": "high" }] }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.store.get_ledger(fixture.exam.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_malformed_results_body_for_unknown_exam_is_not_found() {
    let app = setup_test_app();
    let user = app.create_user("Tess").await;

    let (status, body) = app
        .post(
            &format!("/api/exams/{}/results", Uuid::new_v4()),
            &user.token,
            json!({ "results": null }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Exam not found");
}
