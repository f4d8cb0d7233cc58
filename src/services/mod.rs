pub mod responder;
pub mod session_manager;
