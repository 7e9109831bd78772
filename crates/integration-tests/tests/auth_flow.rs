//! Route guard, login, onboarding and logout.

use axum::http::StatusCode;

use agrow_integration_tests::{TestContext, location, sample_records};

const GUARDED_PATHS: [&str; 4] = [
    "/dashboard",
    "/region-selection",
    "/crop-selection",
    "/settings",
];

#[tokio::test]
async fn test_guard_redirects_anonymous_visitors() {
    let ctx = TestContext::new().await;

    for path in GUARDED_PATHS {
        let response = ctx.server.get(path).await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/auth?mode=login", "{path}");
    }
}

#[tokio::test]
async fn test_public_pages_render_for_visitors() {
    let ctx = TestContext::new().await;

    for path in ["/", "/auth", "/disease-detection", "/chatbot"] {
        ctx.server.get(path).await.assert_status_ok();
    }
}

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await;
    let response = ctx.server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("ok");
}

#[tokio::test]
async fn test_static_files_come_from_configured_dir() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/static/css/main.css").await;
    response.assert_status_ok();
    assert!(response.text().contains(".field-error"));

    ctx.server
        .get("/static/css/missing.css")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_requires_fields() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/login")
        .form(&[("username", ""), ("password", "")])
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.text();
    assert!(body.contains("Username is required"));
    assert!(body.contains("Password is required"));

    ctx.server
        .get("/dashboard")
        .await
        .assert_status(StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_login_continues_to_region_selection() {
    let ctx = TestContext::new().await;

    let response = ctx.login("ravi").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/region-selection");

    ctx.server.get("/region-selection").await.assert_status_ok();
}

#[tokio::test]
async fn test_onboarding_selections_reach_the_dashboard() {
    let ctx = TestContext::new().await;
    ctx.mount_market(sample_records()).await;
    ctx.login("ravi").await;

    let region = ctx
        .server
        .post("/region-selection")
        .form(&[("state", "Maharashtra"), ("district", "Nashik")])
        .await;
    region.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&region), "/crop-selection");

    let crops = ctx
        .server
        .post("/crop-selection")
        .form(&[("crops", "Onion"), ("crops", "Grapes")])
        .await;
    crops.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&crops), "/dashboard");

    let dashboard = ctx.server.get("/dashboard").await;
    dashboard.assert_status_ok();
    let body = dashboard.text();
    assert!(body.contains("Welcome, ravi"));
    assert!(body.contains("Nashik"));
    assert!(body.contains("Onion"));
    assert!(body.contains("Grapes"));
}

#[tokio::test]
async fn test_onboarding_rejects_empty_selections() {
    let ctx = TestContext::new().await;
    ctx.login("ravi").await;

    let region = ctx
        .server
        .post("/region-selection")
        .form(&[("state", "Maharashtra"), ("district", "")])
        .await;
    region.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(region.text().contains("Please select a district"));

    let crops = ctx
        .server
        .post("/crop-selection")
        .form(&[("crops", " ")])
        .await;
    crops.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(crops.text().contains("Please select at least one crop"));
}

#[tokio::test]
async fn test_region_page_lists_districts_of_chosen_state() {
    let ctx = TestContext::new().await;
    ctx.login("ravi").await;

    let body = ctx
        .server
        .get("/region-selection?state=Maharashtra")
        .await
        .text();
    assert!(body.contains(r#"<option value="Kolhapur">"#));
}

#[tokio::test]
async fn test_registration_signs_in() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/register")
        .form(&[
            ("username", "sunita"),
            ("email", "sunita@example.com"),
            ("password", "secret1"),
            ("confirm_password", "secret1"),
            ("phone", "+91 98765 43210"),
            ("state", "Maharashtra"),
            ("city", "Pune"),
            ("crop_preferences", "Cotton"),
        ])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/region-selection");

    // Registration crops pre-tick the crop step.
    let body = ctx.server.get("/crop-selection").await.text();
    assert!(body.contains(r#"value="Cotton" checked"#));
}

#[tokio::test]
async fn test_registration_errors_keep_input() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/register")
        .form(&[
            ("username", "sunita"),
            ("email", "not-an-email"),
            ("password", "abc"),
            ("confirm_password", "abc"),
            ("phone", ""),
            ("state", "Maharashtra"),
            ("city", ""),
        ])
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.text();
    assert!(body.contains(r#"value="sunita""#));
    assert!(body.contains(r#"<option value="Pune">"#));
}

#[tokio::test]
async fn test_load_cities_skips_validation() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/register")
        .form(&[("state", "Maharashtra"), ("action", "load_cities")])
        .await;

    response.assert_status_ok();
    assert!(response.text().contains(r#"<option value="Nagpur">"#));
}

#[tokio::test]
async fn test_logout_locks_guarded_pages() {
    let ctx = TestContext::new().await;
    ctx.mount_market(sample_records()).await;
    ctx.onboard("Pune", &["Onion"]).await;
    ctx.server.get("/dashboard").await.assert_status_ok();

    let response = ctx.server.post("/auth/logout").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    ctx.server
        .get("/dashboard")
        .await
        .assert_status(StatusCode::SEE_OTHER);
}
