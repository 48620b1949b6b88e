//! Tool selection and invocation against the remote tool server.

pub mod orchestrator;
pub mod scorer;
pub mod traits;

pub use orchestrator::{maybe_invoke_tool, ToolInvocation, ToolOrchestrator, ToolOutcome, TRIGGER_WORDS};
pub use scorer::{score_tool, KeywordSelector};
pub use traits::{ToolRegistry, ToolSelector};
