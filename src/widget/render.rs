//! Projections of the transcript for a host to display. Nothing here touches
//! controller state.

use super::transcript::{Message, Role, Transcript};

pub const REF_HEADING: &str = "Reference information:";

/// Markup of a single message, as appended to the message list container.
pub fn message_html(message: &Message) -> String {
    let mut html = format!(
        r#"<div class="message {}-message"><div class="message-content"><p>{}</p>"#,
        message.role.as_str(),
        with_line_breaks(&escape_html(&message.content)),
    );

    if !message.refs.is_empty() {
        html.push_str(&format!(r#"<div class="ref-info"><h4>{REF_HEADING}</h4><ul>"#));
        for url in message.ref_urls() {
            let url = escape_html(url);
            html.push_str(&format!(
                r#"<li><a href="{url}" target="_blank" rel="noopener noreferrer">{url}</a></li>"#
            ));
        }
        html.push_str("</ul></div>");
    }

    html.push_str("</div></div>");
    html
}

/// Markup of the whole message list, oldest first.
pub fn transcript_html(transcript: &Transcript) -> String {
    transcript.messages().iter().map(message_html).collect()
}

/// Terminal rendering of a single message.
pub fn message_text(message: &Message) -> String {
    let label = match message.role {
        Role::User => "you",
        Role::Bot => "bot",
    };
    let indent = " ".repeat(label.len() + 3);
    let mut out = String::new();
    for (i, line) in message.content.split('\n').enumerate() {
        if i == 0 {
            out.push_str(&format!("[{label}] {line}\n"));
        } else {
            out.push_str(&format!("{indent}{line}\n"));
        }
    }
    if !message.refs.is_empty() {
        out.push_str(&format!("  {REF_HEADING}\n"));
        for url in message.ref_urls() {
            out.push_str(&format!("    - {url}\n"));
        }
    }
    out
}

fn with_line_breaks(text: &str) -> String {
    text.replace('\n', "<br>")
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
