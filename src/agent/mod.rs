//! Conversation handling: sessions, message assembly, and turn processing.

pub mod context;
pub mod repl;
pub mod session;
pub mod system_prompt;
pub mod turn;

pub use session::Session;
pub use turn::SupportAgent;
