//! Integration tests for registration, login, and profile access.

mod helpers;

use http::StatusCode;

use helpers::{PASSWORD, TestApp, field};

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new();

    let body = app.register("Jane.Doe@Example.com").await;

    assert!(!field(&body, "accessToken").is_empty());
    assert!(!field(&body, "refreshToken").is_empty());

    let user = body.get("user").expect("no user in response");
    assert_eq!(user.get("email").unwrap(), "jane.doe@example.com");
    assert_eq!(user.get("roles").unwrap(), &serde_json::json!(["patient"]));
    assert_eq!(user.get("status").unwrap(), "active");
    assert_eq!(user.get("firstName").unwrap(), "Jane");
}

#[tokio::test]
async fn test_register_duplicate_email_is_conflict() {
    let app = TestApp::new();
    app.register("jane@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "JANE@EXAMPLE.COM",
                "password": PASSWORD,
                "firstName": "Janet",
                "lastName": "Doe",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body.get("success").unwrap(), false);
    assert_eq!(
        field(&response.body, "message"),
        "Account with this email already exists"
    );

    // The original registration is unaffected.
    app.login("jane@example.com", PASSWORD).await;
}

#[tokio::test]
async fn test_register_rejects_malformed_email() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "not-an-email",
                "password": PASSWORD,
                "firstName": "Jane",
                "lastName": "Doe",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "jane@example.com",
                "password": "password",
                "firstName": "Jane",
                "lastName": "Doe",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_with_explicit_roles() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "dr.smith@example.com",
                "password": PASSWORD,
                "firstName": "Ada",
                "lastName": "Smith",
                "roles": ["doctor", "admin"],
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let user = response.body.get("user").unwrap();
    assert_eq!(
        user.get("roles").unwrap(),
        &serde_json::json!(["doctor", "admin"])
    );
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    app.register("jane@example.com").await;

    let body = app.login("jane@example.com", PASSWORD).await;
    assert!(!field(&body, "accessToken").is_empty());
    assert!(!field(&body, "refreshToken").is_empty());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();
    app.register("jane@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "jane@example.com",
                "password": "wrong-password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(field(&response.body, "message"), "Invalid email or password");
}

#[tokio::test]
async fn test_login_unknown_email_fails_identically() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "nobody@example.com",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(field(&response.body, "message"), "Invalid email or password");
}

#[tokio::test]
async fn test_profile_authenticated() {
    let app = TestApp::new();
    let registered = app.register("jane@example.com").await;
    let token = field(&registered, "accessToken");

    let response = app
        .request("GET", "/api/auth/profile", None, Some(token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.get("email").unwrap(), "jane@example.com");
    assert_eq!(response.body.get("firstName").unwrap(), "Jane");
    assert!(response.body.get("createdAt").is_some());
    assert!(response.body.get("lastLoginAt").is_some());
}

#[tokio::test]
async fn test_profile_never_exposes_secrets() {
    let app = TestApp::new();
    let registered = app.register("jane@example.com").await;
    let token = field(&registered, "accessToken");

    let response = app
        .request("GET", "/api/auth/profile", None, Some(token))
        .await;

    for forbidden in [
        "password",
        "passwordHash",
        "password_hash",
        "refreshToken",
        "currentRefreshToken",
        "current_refresh_token",
    ] {
        assert!(
            response.body.get(forbidden).is_none(),
            "profile leaked '{forbidden}': {:?}",
            response.body
        );
    }
}

#[tokio::test]
async fn test_profile_requires_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/auth/profile", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(field(&response.body, "message"), "No token provided");
}

#[tokio::test]
async fn test_profile_rejects_malformed_authorization_headers() {
    let app = TestApp::new();

    for header in ["Token abc", "Bearer", "Bearer a b"] {
        let req = http::Request::builder()
            .method("GET")
            .uri("/api/auth/profile")
            .header("Authorization", header)
            .body(axum::body::Body::empty())
            .unwrap();

        let response = tower::ServiceExt::oneshot(app.router.clone(), req)
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "header '{header}' was not rejected"
        );
    }
}

#[tokio::test]
async fn test_profile_rejects_garbage_token() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/auth/profile", None, Some("not.a.token"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(field(&response.body, "message"), "Invalid access token");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/auth/nope", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(field(&response.body, "message"), "Resource not found");
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.get("status").unwrap(), "ok");
}
