mod common;

use axum::http::StatusCode;
use classbook::store::MembershipStore;
use classbook_models::memberships::MembershipRole;
use common::setup_test_app;
use uuid::Uuid;

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app();

    let (status, body) = app.request("GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_classes_without_token() {
    let app = setup_test_app();

    let (status, body) = app.request("GET", "/api/classes", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization header");
}

#[tokio::test]
async fn test_list_classes_with_malformed_header() {
    let app = setup_test_app();

    let request = axum::http::Request::builder()
        .uri("/api/classes")
        .header("authorization", "Token abc")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_classes_with_invalid_token() {
    let app = setup_test_app();

    let (status, body) = app.get("/api/classes", "not-a-jwt").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_list_my_classes_covers_both_roles() {
    let app = setup_test_app();
    let (taught, teacher) = app.class_with_teacher().await;
    let attended = app.create_class("C2").await;
    let unrelated = app.create_class("C3").await;
    app.store
        .enroll(teacher.user.id, attended.id, MembershipRole::Student)
        .await
        .unwrap();

    let (status, body) = app.get("/api/classes", &teacher.token).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<String> = body["classes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&taught.id.to_string()));
    assert!(ids.contains(&attended.id.to_string()));
    assert!(!ids.contains(&unrelated.id.to_string()));
}

#[tokio::test]
async fn test_list_my_classes_empty_for_new_user() {
    let app = setup_test_app();
    app.create_class("C1").await;
    let loner = app.create_user("Lone").await;

    let (status, body) = app.get("/api/classes", &loner.token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["classes"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_class_detail_partitions_members_by_role() {
    let app = setup_test_app();
    let (class, teacher) = app.class_with_teacher().await;
    let student = app.create_user("Sam").await;
    app.store
        .enroll(student.user.id, class.id, MembershipRole::Student)
        .await
        .unwrap();
    app.post(
        &format!("/api/classes/{}/subjects", class.id),
        &teacher.token,
        serde_json::json!({ "name": "Math" }),
    )
    .await;

    let (status, body) = app
        .get(&format!("/api/classes/{}", class.id), &student.token)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["class"]["name"], "C1");
    let teachers = body["teachers"].as_array().unwrap();
    let students = body["students"].as_array().unwrap();
    assert_eq!(teachers.len(), 1);
    assert_eq!(students.len(), 1);
    assert_eq!(teachers[0]["id"], teacher.user.id.to_string());
    assert_eq!(students[0]["id"], student.user.id.to_string());
    assert_eq!(body["subjects"][0]["name"], "Math");
}

#[tokio::test]
async fn test_class_detail_not_found() {
    let app = setup_test_app();
    let user = app.create_user("Nobody").await;

    let (status, body) = app
        .get(&format!("/api/classes/{}", Uuid::new_v4()), &user.token)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Class not found");
}
