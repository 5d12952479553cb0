mod common;

use axum::http::StatusCode;
use classbook::store::{MembershipStore, RegistryStore};
use classbook_models::memberships::MembershipRole;
use common::setup_test_app;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_teacher_creates_exam() {
    let app = setup_test_app();
    let (class, teacher) = app.class_with_teacher().await;
    let subject = app.store.add_subject(class.id, "Math", "").await.unwrap();

    let (status, body) = app
        .post(
            &format!("/api/classes/{}/subjects/{}/exams", class.id, subject.id),
            &teacher.token,
            json!({ "name": "Midterm", "description": "Chapters 1-4" }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Exam created successfully.");
    assert_eq!(body["exam"]["name"], "Midterm");
    assert_eq!(body["exam"]["class_id"], class.id.to_string());
    assert_eq!(body["exam"]["subject_id"], subject.id.to_string());
}

#[tokio::test]
async fn test_exam_name_required() {
    let app = setup_test_app();
    let (class, teacher) = app.class_with_teacher().await;
    let subject = app.store.add_subject(class.id, "Math", "").await.unwrap();

    let (status, body) = app
        .post(
            &format!("/api/classes/{}/subjects/{}/exams", class.id, subject.id),
            &teacher.token,
            json!({ "description": "no name" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Exam name is required.");
    assert!(app.store.list_exams(class.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_exam_subject_from_other_class() {
    let app = setup_test_app();
    let (class, teacher) = app.class_with_teacher().await;
    let other = app.create_class("C2").await;
    let foreign = app.store.add_subject(other.id, "Art", "").await.unwrap();

    let (status, body) = app
        .post(
            &format!("/api/classes/{}/subjects/{}/exams", class.id, foreign.id),
            &teacher.token,
            json!({ "name": "Midterm" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Subject does not belong to this class.");
}

#[tokio::test]
async fn test_exam_unknown_subject() {
    let app = setup_test_app();
    let (class, teacher) = app.class_with_teacher().await;

    let (status, body) = app
        .post(
            &format!("/api/classes/{}/subjects/{}/exams", class.id, Uuid::new_v4()),
            &teacher.token,
            json!({ "name": "Midterm" }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Subject not found");
}

#[tokio::test]
async fn test_student_cannot_create_exam() {
    let app = setup_test_app();
    let (class, _teacher) = app.class_with_teacher().await;
    let subject = app.store.add_subject(class.id, "Math", "").await.unwrap();
    let student = app.create_user("Sam").await;
    app.store
        .enroll(student.user.id, class.id, MembershipRole::Student)
        .await
        .unwrap();

    let (status, body) = app
        .post(
            &format!("/api/classes/{}/subjects/{}/exams", class.id, subject.id),
            &student.token,
            json!({ "name": "Midterm" }),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"],
        "You are not authorized to create an exam for this class."
    );
}

#[tokio::test]
async fn test_list_exams_for_class() {
    let app = setup_test_app();
    let (class, teacher) = app.class_with_teacher().await;
    let math = app.store.add_subject(class.id, "Math", "").await.unwrap();
    let science = app.store.add_subject(class.id, "Science", "").await.unwrap();
    for (subject, name) in [(math.id, "Midterm"), (science.id, "Lab Quiz")] {
        app.post(
            &format!("/api/classes/{}/subjects/{}/exams", class.id, subject),
            &teacher.token,
            json!({ "name": name }),
        )
        .await;
    }

    let (status, body) = app
        .get(&format!("/api/classes/{}/exams", class.id), &teacher.token)
        .await;

    assert_eq!(status, StatusCode::OK);
    let exams = body["exams"].as_array().unwrap();
    assert_eq!(exams.len(), 2);
    assert_eq!(exams[0]["name"], "Midterm");
    assert_eq!(exams[1]["subject_id"], science.id.to_string());
}

#[tokio::test]
async fn test_student_with_malformed_exam_body_is_forbidden() {
    let app = setup_test_app();
    let (class, _teacher) = app.class_with_teacher().await;
    let subject = app.store.add_subject(class.id, "Math", "").await.unwrap();
    let student = app.create_user("Sam").await;
    app.store
        .enroll(student.user.id, class.id, MembershipRole::Student)
        .await
        .unwrap();

    let (status, _) = app
        .post(
            &format!("/api/classes/{}/subjects/{}/exams", class.id, subject.id),
            &student.token,
            json!({ "name": ["Midterm"] }),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(app.store.list_exams(class.id).await.unwrap().is_empty());
}
