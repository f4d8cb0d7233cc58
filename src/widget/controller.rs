use super::backend::ChatBackend;
use super::input::{InputBox, InputMetrics};
use super::session::SessionId;
use super::transcript::{Message, Transcript};

pub const ERROR_PREFIX: &str = "Sorry, something went wrong: ";
pub const CHAT_APOLOGY: &str = "Sorry, we could not reach the server. Please try again later.";
pub const CLEAR_CONFIRMATION: &str = "Context cleared. Let's start a new conversation!";
pub const CLEAR_APOLOGY: &str = "Sorry, the context could not be cleared. Please try again later.";

/// Input the host forwards from its UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SendClicked,
    KeyDown { key: String, shift: bool },
    InputChanged(String),
    ClearClicked,
}

impl UiEvent {
    pub fn key(key: impl Into<String>, shift: bool) -> Self {
        UiEvent::KeyDown { key: key.into(), shift }
    }
}

/// Whether the host should still perform the default action for the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Default,
    Prevented,
}

/// Incremental updates for hosts that patch their view instead of
/// re-projecting the transcript.
#[derive(Debug, Clone, Copy)]
pub enum ViewChange<'a> {
    MessageAppended(&'a Message),
    MessagesCleared,
    TypingIndicator(bool),
    InputResized(u32),
    ScrolledToBottom,
}

pub type ViewListener = Box<dyn FnMut(ViewChange<'_>) + Send>;

/// Scroll position of the message list, measured in messages from the top.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    pub offset: usize,
}

pub struct ChatController<B> {
    session_id: SessionId,
    backend: B,
    transcript: Transcript,
    input: InputBox,
    typing: bool,
    scroll: ScrollState,
    listener: Option<ViewListener>,
}

impl<B: ChatBackend> ChatController<B> {
    pub fn new(backend: B, injected_session: Option<&str>) -> Self {
        Self::with_metrics(backend, injected_session, InputMetrics::default())
    }

    pub fn with_metrics(backend: B, injected_session: Option<&str>, metrics: InputMetrics) -> Self {
        let session_id = SessionId::resolve(injected_session);
        tracing::debug!(session = %session_id, "chat controller initialised");
        Self {
            session_id,
            backend,
            transcript: Transcript::new(),
            // InputBox::new performs the initial height sync.
            input: InputBox::new(metrics),
            typing: false,
            scroll: ScrollState::default(),
            listener: None,
        }
    }

    pub fn set_listener<F>(&mut self, listener: F)
    where
        F: FnMut(ViewChange<'_>) + Send + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &InputBox {
        &self.input
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn handle(&mut self, event: UiEvent) -> Dispatch {
        match event {
            UiEvent::SendClicked => {
                self.send_message().await;
                Dispatch::Default
            }
            UiEvent::KeyDown { key, shift } if key == "Enter" && !shift => {
                self.send_message().await;
                Dispatch::Prevented
            }
            UiEvent::KeyDown { .. } => Dispatch::Default,
            UiEvent::InputChanged(text) => {
                self.input.set_value(text);
                self.notify(ViewChange::InputResized(self.input.height()));
                Dispatch::Default
            }
            UiEvent::ClearClicked => {
                self.clear_context().await;
                Dispatch::Default
            }
        }
    }

    pub fn auto_resize(&mut self) {
        self.input.auto_resize();
        self.notify(ViewChange::InputResized(self.input.height()));
    }

    /// Send whatever is in the input box. Blank input is ignored.
    pub async fn send_message(&mut self) {
        let text = self.input.value().trim().to_string();
        if text.is_empty() {
            return;
        }

        self.add_message(Message::user(text.as_str()));
        self.input.take();
        self.auto_resize();
        self.show_typing_indicator();

        let reply = match self.backend.send_chat(&self.session_id, &text).await {
            Ok(resp) if resp.success => {
                Message::bot_with_refs(resp.response.unwrap_or_default(), resp.ref_info)
            }
            Ok(resp) => Message::bot(format!(
                "{ERROR_PREFIX}{}",
                resp.error.unwrap_or_default()
            )),
            Err(err) => {
                tracing::error!(session = %self.session_id, error = %err, "chat request failed");
                Message::bot(CHAT_APOLOGY)
            }
        };
        self.add_message(reply);

        // Every path above falls through to here.
        self.hide_typing_indicator();
    }

    pub async fn clear_context(&mut self) {
        match self.backend.clear_context(&self.session_id).await {
            Ok(outcome) => match outcome.rejected_by_server() {
                None => {
                    self.transcript.clear();
                    self.scroll = ScrollState::default();
                    self.notify(ViewChange::MessagesCleared);
                    self.add_message(Message::bot(CLEAR_CONFIRMATION));
                }
                Some(reason) => {
                    tracing::warn!(session = %self.session_id, reason, "server refused to clear context");
                    self.add_message(Message::bot(CLEAR_APOLOGY));
                }
            },
            Err(err) => {
                tracing::error!(session = %self.session_id, error = %err, "clear context request failed");
                self.add_message(Message::bot(CLEAR_APOLOGY));
            }
        }
    }

    pub fn add_message(&mut self, message: Message) {
        self.transcript.push(message);
        if let (Some(listener), Some(last)) = (self.listener.as_mut(), self.transcript.last()) {
            listener(ViewChange::MessageAppended(last));
        }
        self.scroll_to_bottom();
    }

    pub fn show_typing_indicator(&mut self) {
        self.typing = true;
        self.notify(ViewChange::TypingIndicator(true));
        self.scroll_to_bottom();
    }

    pub fn hide_typing_indicator(&mut self) {
        self.typing = false;
        self.notify(ViewChange::TypingIndicator(false));
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll.offset = self.transcript.len();
        self.notify(ViewChange::ScrolledToBottom);
    }

    fn notify(&mut self, change: ViewChange<'_>) {
        if let Some(listener) = self.listener.as_mut() {
            listener(change);
        }
    }
}
