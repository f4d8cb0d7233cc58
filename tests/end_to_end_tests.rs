use std::sync::Arc;
use std::time::Duration;

use spark_chat::routes::create_router;
use spark_chat::state::AppState;
use spark_chat::widget::controller::{CHAT_APOLOGY, CLEAR_CONFIRMATION};
use spark_chat::widget::{ChatController, HttpBackend, Role, UiEvent};

async fn spawn_server() -> (String, Arc<AppState>) {
    let state = Arc::new(AppState::echo(Duration::from_secs(60), 10));
    let app = create_router().with_state(Arc::clone(&state));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), state)
}

#[tokio::test]
async fn chat_round_trip_over_http() {
    let (url, state) = spawn_server().await;
    let mut controller = ChatController::new(HttpBackend::new(url), Some("e2e-session"));

    controller.handle(UiEvent::InputChanged("hello\nworld".into())).await;
    controller.handle(UiEvent::key("Enter", false)).await;

    let messages = controller.transcript().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].role, Role::Bot);
    assert_eq!(messages[1].content, "You said: hello\nworld");
    assert!(!controller.is_typing());

    let history = state.sessions.get_history("e2e-session").await.unwrap();
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn clear_context_over_http() {
    let (url, state) = spawn_server().await;
    let mut controller = ChatController::new(HttpBackend::new(url), Some("e2e-clear"));

    controller.handle(UiEvent::InputChanged("remember this".into())).await;
    controller.handle(UiEvent::SendClicked).await;
    assert_eq!(state.sessions.len().await, 1);

    controller.handle(UiEvent::ClearClicked).await;

    assert_eq!(state.sessions.len().await, 0);
    let messages = controller.transcript().messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, CLEAR_CONFIRMATION);
}

#[tokio::test]
async fn unreachable_server_yields_apology() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut controller =
        ChatController::new(HttpBackend::new(format!("http://{}", addr)), Some("offline"));
    controller.handle(UiEvent::InputChanged("anyone?".into())).await;
    controller.handle(UiEvent::SendClicked).await;

    let messages = controller.transcript().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].content, CHAT_APOLOGY);
    assert!(!controller.is_typing());
}
