use crate::message::RefEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Bot => "bot",
        }
    }
}

/// One rendered conversation turn. Never mutated once pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub refs: Vec<RefEntry>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            refs: Vec::new(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::bot_with_refs(content, Vec::new())
    }

    pub fn bot_with_refs(content: impl Into<String>, refs: Vec<RefEntry>) -> Self {
        Self {
            role: Role::Bot,
            content: content.into(),
            refs,
        }
    }

    /// Every URL across all reference entries, in order. Entries without
    /// `urls` are skipped.
    pub fn ref_urls(&self) -> impl Iterator<Item = &str> {
        self.refs
            .iter()
            .filter_map(|entry| entry.urls.as_deref())
            .flatten()
            .map(String::as_str)
    }
}

/// Ordered conversation shown by the widget.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
