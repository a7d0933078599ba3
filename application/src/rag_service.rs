use crate::prompt::{build_prompt, join_context};
use anyhow::Context;
use domain::models::Answer;
use domain::providers::{ChatModel, EmbeddingProvider};
use infrastructure::search::VectorIndex;
use shared::telemetry::Telemetry;
use shared::types::Result;
use tracing::{debug, info};

/// Number of chunks handed to the model per question.
pub const DEFAULT_TOP_K: usize = 5;

/// Retrieve → prompt → generate, in that order, once per question.
///
/// Everything inside is immutable after construction, so one instance is
/// shared by all requests.
pub struct RagService<E, M> {
    embedder: E,
    index: VectorIndex,
    model: M,
    top_k: usize,
}

impl<E, M> RagService<E, M>
where
    E: EmbeddingProvider + Send + Sync,
    M: ChatModel + Send + Sync,
{
    pub fn new(embedder: E, index: VectorIndex, model: M) -> Self {
        Self {
            embedder,
            index,
            model,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Embeds the question and returns the matching chunk texts joined into one context block.
    pub async fn retrieve_context(&self, question: &str) -> Result<String> {
        let query_embedding = self
            .embedder
            .embed(question)
            .await
            .context("failed to embed question")?;
        let matches = self
            .index
            .search(&query_embedding, self.top_k)
            .context("vector store lookup failed")?;
        debug!(
            matches = matches.len(),
            top_score = ?matches.first().map(|m| m.score),
            "Retrieved context"
        );
        Ok(join_context(matches.iter().map(|m| m.chunk.text.as_str())))
    }

    pub async fn build_prompt(&self, question: &str) -> Result<String> {
        let context = self.retrieve_context(question).await?;
        Ok(build_prompt(&context, question))
    }

    pub async fn answer(&self, question: &str) -> Result<Answer> {
        let telemetry = Telemetry::new();
        info!(question, "Received question");
        let prompt = self.build_prompt(question).await?;
        let text = self
            .model
            .complete(&prompt)
            .await
            .context("language model call failed")?;
        info!(elapsed_ms = telemetry.elapsed_ms() as u64, "Generated answer");
        debug!(answer = %text, "Generated response");
        Ok(Answer::from(text))
    }
}
