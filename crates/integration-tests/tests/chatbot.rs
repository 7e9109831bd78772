//! Scripted assistant transcript.

use axum::http::StatusCode;

use agrow_integration_tests::{TestContext, location};

#[tokio::test]
async fn test_transcript_starts_empty() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/chatbot").await;
    response.assert_status_ok();
    assert!(response.text().contains("Start the conversation with a question below."));
}

#[tokio::test]
async fn test_message_gets_a_reply() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/chatbot")
        .form(&[("message", "hello")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/chatbot");

    let body = ctx.server.get("/chatbot").await.text();
    assert!(body.contains("hello"));
    assert!(body.contains("Namaste! I am your Agrow farming assistant"));
    assert!(!body.contains("Start the conversation with a question below."));
}

#[tokio::test]
async fn test_blank_message_is_ignored() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/chatbot")
        .form(&[("message", "   ")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);

    let body = ctx.server.get("/chatbot").await.text();
    assert!(body.contains("Start the conversation with a question below."));
}

#[tokio::test]
async fn test_clear_empties_transcript() {
    let ctx = TestContext::new().await;
    ctx.server
        .post("/chatbot")
        .form(&[("message", "hello")])
        .await;

    let response = ctx.server.post("/chatbot/clear").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/chatbot");

    let body = ctx.server.get("/chatbot").await.text();
    assert!(body.contains("Start the conversation with a question below."));
}
