//! Integration tests for the refresh/logout session lifecycle.

mod helpers;

use http::StatusCode;

use helpers::{PASSWORD, TestApp, field};

#[tokio::test]
async fn test_refresh_returns_new_access_token() {
    let app = TestApp::new();
    let registered = app.register("jane@example.com").await;
    let refresh_token = field(&registered, "refreshToken");

    // The same refresh token keeps working — it is never rotated here.
    for _ in 0..3 {
        let response = app
            .request(
                "POST",
                "/api/auth/refresh-token",
                Some(serde_json::json!({ "refreshToken": refresh_token })),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        let access_token = field(&response.body, "accessToken");

        // Each minted access token authenticates a request.
        let profile = app
            .request("GET", "/api/auth/profile", None, Some(access_token))
            .await;
        assert_eq!(profile.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_refresh_with_garbage_token() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/refresh-token",
            Some(serde_json::json!({ "refreshToken": "definitely.not.a.token" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        field(&response.body, "message"),
        "Invalid or expired refresh token provided"
    );
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    let app = TestApp::new();
    let registered = app.register("jane@example.com").await;
    let access_token = field(&registered, "accessToken");
    let refresh_token = field(&registered, "refreshToken");

    let response = app
        .request("POST", "/api/auth/logout", None, Some(access_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.get("success").unwrap(), true);

    // The refresh token from before the logout is no longer accepted.
    let response = app
        .request(
            "POST",
            "/api/auth/refresh-token",
            Some(serde_json::json!({ "refreshToken": refresh_token })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        field(&response.body, "message"),
        "Invalid or expired refresh token provided"
    );
}

#[tokio::test]
async fn test_access_token_survives_logout() {
    let app = TestApp::new();
    let registered = app.register("jane@example.com").await;
    let access_token = field(&registered, "accessToken");

    app.request("POST", "/api/auth/logout", None, Some(access_token))
        .await;

    // Access tokens are verified cryptographically only, so an already
    // issued one stays valid for its full window even after logout.
    let response = app
        .request("GET", "/api/auth/profile", None, Some(access_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_invalidates_previous_refresh_token() {
    let app = TestApp::new();
    let registered = app.register("jane@example.com").await;
    let first_refresh = field(&registered, "refreshToken").to_string();

    // Token timestamps have second resolution; step past the issuance
    // second so the next login mints a distinct token.
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    let logged_in = app.login("jane@example.com", PASSWORD).await;
    let second_refresh = field(&logged_in, "refreshToken").to_string();
    assert_ne!(first_refresh, second_refresh);

    // Only the newest refresh token occupies the single session slot.
    let response = app
        .request(
            "POST",
            "/api/auth/refresh-token",
            Some(serde_json::json!({ "refreshToken": first_refresh })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            "POST",
            "/api/auth/refresh-token",
            Some(serde_json::json!({ "refreshToken": second_refresh })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_requires_token() {
    let app = TestApp::new();

    let response = app.request("POST", "/api/auth/logout", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(field(&response.body, "message"), "No token provided");
}

#[tokio::test]
async fn test_second_logout_still_succeeds() {
    let app = TestApp::new();
    let registered = app.register("jane@example.com").await;
    let access_token = field(&registered, "accessToken");

    let first = app
        .request("POST", "/api/auth/logout", None, Some(access_token))
        .await;
    assert_eq!(first.status, StatusCode::OK);

    // Clearing an already-empty slot is a no-op as long as the account
    // still exists.
    let second = app
        .request("POST", "/api/auth/logout", None, Some(access_token))
        .await;
    assert_eq!(second.status, StatusCode::OK);
}
