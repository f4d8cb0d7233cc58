use axum::Router;
use axum::http::{StatusCode, header};
use axum::routing::post;

use spark_chat::widget::controller::{
    CHAT_APOLOGY, CLEAR_APOLOGY, CLEAR_CONFIRMATION, ERROR_PREFIX,
};
use spark_chat::widget::render::message_html;
use spark_chat::widget::{ChatController, HttpBackend, Role, UiEvent};

/// Serve a fixed body for both widget endpoints.
async fn stub_server(status: StatusCode, content_type: &'static str, body: &'static str) -> String {
    let reply = move || async move { (status, [(header::CONTENT_TYPE, content_type)], body) };
    let app = Router::new()
        .route("/api/chat", post(reply))
        .route("/api/clear_context", post(reply));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn json_server(status: StatusCode, body: &'static str) -> String {
    stub_server(status, "application/json", body).await
}

/// Send one message and return the bot's reply text.
async fn bot_reply_to(url: String) -> (String, ChatController<HttpBackend>) {
    let mut controller = ChatController::new(HttpBackend::new(url), Some("wire"));
    controller.handle(UiEvent::InputChanged("hi".into())).await;
    controller.handle(UiEvent::SendClicked).await;

    assert!(!controller.is_typing());
    let messages = controller.transcript().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].role, Role::Bot);
    (messages[1].content.clone(), controller)
}

#[tokio::test]
async fn null_ref_info_still_shows_reply() {
    let url = json_server(
        StatusCode::OK,
        r#"{"success": true, "response": "Hello", "ref_info": null}"#,
    )
    .await;

    let (text, controller) = bot_reply_to(url).await;
    assert_eq!(text, "Hello");
    let html = message_html(controller.transcript().last().unwrap());
    assert!(html.contains("Hello"));
    assert!(!html.contains("ref-info"));
}

#[tokio::test]
async fn null_ref_entries_are_skipped() {
    let url = json_server(
        StatusCode::OK,
        r#"{"success": true, "response": "Hello", "ref_info": [null, {"title": "no urls"}, {"urls": ["http://a"]}]}"#,
    )
    .await;

    let (text, controller) = bot_reply_to(url).await;
    assert_eq!(text, "Hello");
    let html = message_html(controller.transcript().last().unwrap());
    assert_eq!(html.matches("<a href=").count(), 1);
    assert!(html.contains(r#"href="http://a""#));
}

#[tokio::test]
async fn success_without_response_renders_empty_reply() {
    let url = json_server(StatusCode::OK, r#"{"success": true}"#).await;

    let (text, _) = bot_reply_to(url).await;
    assert_eq!(text, "");
}

#[tokio::test]
async fn failure_without_error_field_keeps_prefix() {
    let url = json_server(StatusCode::OK, r#"{"success": false}"#).await;

    let (text, _) = bot_reply_to(url).await;
    assert_eq!(text, ERROR_PREFIX);
}

#[tokio::test]
async fn error_status_with_json_body_shows_server_error() {
    let url = json_server(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"success": false, "error": "model timeout"}"#,
    )
    .await;

    let (text, _) = bot_reply_to(url).await;
    assert_eq!(text, format!("{ERROR_PREFIX}model timeout"));
}

#[tokio::test]
async fn non_json_error_page_shows_apology() {
    let url = stub_server(
        StatusCode::INTERNAL_SERVER_ERROR,
        "text/html",
        "<html>Internal Server Error</html>",
    )
    .await;

    let (text, _) = bot_reply_to(url).await;
    assert_eq!(text, CHAT_APOLOGY);
}

async fn clear_against(url: String) -> ChatController<HttpBackend> {
    let mut controller = ChatController::new(HttpBackend::new(url), Some("wire"));
    controller.handle(UiEvent::ClearClicked).await;
    controller
}

#[tokio::test]
async fn clear_with_empty_object_confirms() {
    let url = json_server(StatusCode::OK, "{}").await;

    let controller = clear_against(url).await;
    let messages = controller.transcript().messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, CLEAR_CONFIRMATION);
}

#[tokio::test]
async fn clear_with_unrelated_fields_confirms() {
    let url = json_server(StatusCode::OK, r#"{"status": "ok"}"#).await;

    let controller = clear_against(url).await;
    assert_eq!(
        controller.transcript().last().unwrap().content,
        CLEAR_CONFIRMATION
    );
}

#[tokio::test]
async fn clear_with_plain_text_body_confirms() {
    let url = stub_server(StatusCode::OK, "text/plain", "cleared").await;

    let controller = clear_against(url).await;
    assert_eq!(
        controller.transcript().last().unwrap().content,
        CLEAR_CONFIRMATION
    );
}

#[tokio::test]
async fn clear_explicitly_refused_shows_apology() {
    let url = json_server(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"success": false, "error": "storage unavailable"}"#,
    )
    .await;

    let controller = clear_against(url).await;
    assert_eq!(
        controller.transcript().last().unwrap().content,
        CLEAR_APOLOGY
    );
}
