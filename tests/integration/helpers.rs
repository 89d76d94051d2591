//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use medipass_api::state::AppState;
use medipass_core::config::app::ServerConfig;
use medipass_core::config::auth::AuthConfig;
use medipass_core::config::logging::LoggingConfig;
use medipass_core::config::{AppConfig, DatabaseConfig};
use medipass_credential::jwt::TokenService;
use medipass_credential::password::{PasswordHasher, PasswordValidator};
use medipass_database::store::{IdentityStore, MemoryIdentityStore};
use medipass_service::auth::AuthService;

/// A password that satisfies the registration policy.
pub const PASSWORD: &str = "qW8#vZ2$pL5m";

/// Test application context.
///
/// Runs the full router over the in-memory identity store, so no
/// external services are needed.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
}

impl TestApp {
    /// Create a new test application.
    pub fn new() -> Self {
        let config = test_config();

        let identity_store: Arc<dyn IdentityStore> = Arc::new(MemoryIdentityStore::new());
        let token_service = Arc::new(TokenService::new(&config.auth));
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&identity_store),
            Arc::clone(&token_service),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&config.auth)),
        ));

        let state = AppState {
            config: Arc::new(config),
            identity_store,
            token_service,
            auth_service,
        };

        Self {
            router: medipass_api::router::build_router(state),
        }
    }

    /// Register an account and return the response body.
    pub async fn register(&self, email: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({
                    "email": email,
                    "password": PASSWORD,
                    "firstName": "Jane",
                    "lastName": "Doe",
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Registration failed: {:?}",
            response.body
        );
        response.body
    }

    /// Login and return the response body.
    pub async fn login(&self, email: &str, password: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response.body
    }

    /// Make an HTTP request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
}

/// Extract a string field from a response body.
pub fn field<'a>(body: &'a Value, name: &str) -> &'a str {
    body.get(name)
        .and_then(|v| v.as_str())
        .unwrap_or_else(|| panic!("No '{name}' in response: {body:?}"))
}

fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: "postgres://unused-in-tests".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_seconds: 5,
            idle_timeout_seconds: 60,
        },
        auth: AuthConfig {
            access_secret: "integration-test-access-secret".to_string(),
            refresh_secret: "integration-test-refresh-secret".to_string(),
            issuer: "medipass-test".to_string(),
            ..AuthConfig::default()
        },
        logging: LoggingConfig::default(),
    }
}
