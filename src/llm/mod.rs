pub mod inference;

pub use inference::InferenceClient;

use crate::types::ChatMessage;
use anyhow::Result;
use async_trait::async_trait;

/// The language-model collaborator: an ordered message list in, one reply out.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}
