use shared::types::Result;
use std::future::Future;

/// Turns text into a fixed-size vector.
pub trait EmbeddingProvider {
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>>> + Send;
}

/// Produces a single text completion for a prompt.
pub trait ChatModel {
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}
