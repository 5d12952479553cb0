use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use classbook::router::init_router;
use classbook::state::AppState;
use classbook::store::{InMemoryStore, MembershipStore, RegistryStore, UserDirectory};
use classbook_auth::create_access_token;
use classbook_config::{CorsConfig, JwtConfig, RateLimitConfig};
use classbook_models::classes::{Class, CreateClassDto};
use classbook_models::memberships::MembershipRole;
use classbook_models::users::{CreateUserDto, User};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub jwt_config: JwtConfig,
}

#[allow(dead_code)]
pub struct TestUser {
    pub user: User,
    pub token: String,
}

pub fn setup_test_app() -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    let jwt_config = JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry: 3600,
    };
    let state = AppState {
        store: store.clone(),
        jwt_config: jwt_config.clone(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        // Oneshot requests carry no peer address for the IP key extractor.
        rate_limit_config: RateLimitConfig::disabled(),
    };

    TestApp {
        router: init_router(state),
        store,
        jwt_config,
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

impl TestApp {
    pub async fn create_user(&self, first_name: &str) -> TestUser {
        let user = self
            .store
            .create_user(CreateUserDto {
                email: generate_unique_email(),
                first_name: first_name.to_string(),
                last_name: "Tester".to_string(),
            })
            .await
            .unwrap();
        let token = create_access_token(user.id.into_inner(), &user.email, &self.jwt_config)
            .unwrap();

        TestUser { user, token }
    }

    pub async fn create_class(&self, name: &str) -> Class {
        self.store
            .create_class(CreateClassDto {
                name: name.to_string(),
            })
            .await
            .unwrap()
    }

    /// A class with one teacher, as the admin CLI would set it up.
    #[allow(dead_code)]
    pub async fn class_with_teacher(&self) -> (Class, TestUser) {
        let class = self.create_class("C1").await;
        let teacher = self.create_user("Tess").await;
        self.store
            .enroll(teacher.user.id, class.id, MembershipRole::Teacher)
            .await
            .unwrap();
        (class, teacher)
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    #[allow(dead_code)]
    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request("GET", uri, Some(token), None).await
    }

    #[allow(dead_code)]
    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(token), Some(body)).await
    }
}
