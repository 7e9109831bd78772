//! Language switcher, settings and the not-found page.

use axum::http::StatusCode;

use agrow_integration_tests::{TestContext, location, sample_records};

#[tokio::test]
async fn test_language_switch_translates_pages() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/language")
        .form(&[("language", "mr"), ("redirect", "/crop-prices?commodity=onion")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/crop-prices?commodity=onion");

    let body = ctx.server.get("/").await.text();
    assert!(body.contains("मुख्यपृष्ठ"));
    assert!(body.contains(r#"lang="mr""#));
}

#[tokio::test]
async fn test_language_redirect_stays_local() {
    let ctx = TestContext::new().await;

    for target in [
        "https://evil.example",
        "//evil.example",
        "/\\evil.example",
        "/\t/evil.example",
        "/dash\u{1}board",
    ] {
        let response = ctx
            .server
            .post("/language")
            .form(&[("language", "hi"), ("redirect", target)])
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/", "redirect to {target:?}");
    }
}

#[tokio::test]
async fn test_unsupported_language_is_rejected() {
    let ctx = TestContext::new().await;

    ctx.server
        .post("/language")
        .form(&[("language", "fr"), ("redirect", "/")])
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // The interface stays in English.
    let body = ctx.server.get("/").await.text();
    assert!(!body.contains("मुख्यपृष्ठ"));
}

#[tokio::test]
async fn test_settings_save_updates_dashboard() {
    let ctx = TestContext::new().await;
    ctx.mount_market(sample_records()).await;
    ctx.onboard("Pune", &["Onion"]).await;

    let response = ctx
        .server
        .post("/settings")
        .form(&[
            ("language", "en"),
            ("district", "Nashik"),
            ("crops", "Grapes"),
            ("crops", "Tomato"),
            ("dark_mode", "on"),
        ])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/settings?saved=1");

    let body = ctx.server.get("/settings?saved=1").await.text();
    assert!(body.contains("Settings saved."));
    assert!(body.contains("theme-dark"));

    let body = ctx.server.get("/dashboard").await.text();
    assert!(body.contains("<strong>Nashik</strong>"));
    assert!(body.contains("Tomato"));
}

#[tokio::test]
async fn test_settings_require_district_and_crops() {
    let ctx = TestContext::new().await;
    ctx.onboard("Pune", &["Onion"]).await;

    let response = ctx
        .server
        .post("/settings")
        .form(&[("language", "mr"), ("district", ""), ("crops", "Grapes")])
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let response = ctx
        .server
        .post("/settings")
        .form(&[("language", "mr"), ("district", "Nashik")])
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    // Nothing from the rejected forms was stored.
    let body = ctx.server.get("/settings").await.text();
    assert!(!body.contains("मुख्यपृष्ठ"));
    assert!(body.contains(r#"<option value="Pune" selected>"#));
}

#[tokio::test]
async fn test_unknown_path_renders_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/no-such-page").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.text().contains("Page not found"));
}
