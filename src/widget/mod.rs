//! The chat widget: conversation state, input handling and the calls to the
//! chat backend, independent of any particular UI toolkit.

pub mod backend;
pub mod controller;
pub mod input;
pub mod render;
pub mod session;
pub mod transcript;

pub use backend::{ChatBackend, ClearOutcome, ClientError, HttpBackend};
pub use controller::{ChatController, Dispatch, UiEvent, ViewChange, ViewListener};
pub use session::SessionId;
pub use transcript::{Message, Role, Transcript};
