//! Terminal host for the chat widget.
//!
//! Each stdin line is typed into the message box and sent with Enter. A line
//! ending in `\` is continued on the next line, like Shift+Enter. `/clear`
//! clears the conversation context and `/quit` exits.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use spark_chat::{
    config::ClientConfig,
    init_tracing,
    widget::{ChatController, HttpBackend, UiEvent, ViewChange, render},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = ClientConfig::from_env();

    let backend = HttpBackend::new(&config.server_url);
    let mut controller = ChatController::new(backend, config.session_id.as_deref());
    controller.set_listener(|change| match change {
        ViewChange::MessageAppended(message) => print!("{}", render::message_text(message)),
        ViewChange::MessagesCleared => println!("--------"),
        ViewChange::TypingIndicator(true) => println!("..."),
        _ => {}
    });

    println!(
        "connected to {} as {} (/clear, /quit)",
        config.server_url,
        controller.session_id()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut draft = String::new();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" => break,
            "/clear" if draft.is_empty() => {
                controller.handle(UiEvent::ClearClicked).await;
                continue;
            }
            _ => {}
        }

        if let Some(partial) = line.strip_suffix('\\') {
            draft.push_str(partial);
            controller.handle(UiEvent::InputChanged(draft.clone())).await;
            controller.handle(UiEvent::key("Enter", true)).await;
            // Shift+Enter inserts the newline itself.
            draft.push('\n');
            continue;
        }

        draft.push_str(&line);
        controller.handle(UiEvent::InputChanged(std::mem::take(&mut draft))).await;
        controller.handle(UiEvent::key("Enter", false)).await;
        std::io::stdout().flush()?;
    }

    Ok(())
}
