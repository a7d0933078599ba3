//! Fixtures shared by the integration tests: an on-disk index built the way
//! the offline indexer lays it out, plus in-process embedding and model fakes.

use anyhow::anyhow;
use domain::models::Chunk;
use domain::providers::{ChatModel, EmbeddingProvider};
use infrastructure::embedding_storage::EmbeddingStorage;
use shared::types::Result;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Axes of the toy embedding space used by [`KeywordEmbedder`].
pub const KEYWORDS: [&str; 4] = ["spice", "oil", "shelf", "chicken"];

/// Embeds text as one axis per keyword it mentions.
#[derive(Clone, Default)]
pub struct KeywordEmbedder;

impl KeywordEmbedder {
    pub fn vector_for(text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        KEYWORDS
            .iter()
            .map(|keyword| if lower.contains(keyword) { 1.0 } else { 0.0 })
            .collect()
    }
}

impl EmbeddingProvider for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(Self::vector_for(text))
    }
}

/// Always returns the same vector, whatever the text.
pub struct FixedEmbedder(pub Vec<f32>);

impl EmbeddingProvider for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(self.0.clone())
    }
}

pub struct FailingEmbedder(pub &'static str);

impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(anyhow!(self.0))
    }
}

/// Replies with a canned answer (or error) and records every prompt it sees.
pub struct ScriptedModel {
    reply: std::result::Result<String, String>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedModel {
    pub fn answering(reply: &str) -> (Self, Arc<Mutex<Vec<String>>>) {
        Self::new(Ok(reply.to_string()))
    }

    pub fn failing(message: &str) -> (Self, Arc<Mutex<Vec<String>>>) {
        Self::new(Err(message.to_string()))
    }

    fn new(reply: std::result::Result<String, String>) -> (Self, Arc<Mutex<Vec<String>>>) {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let model = Self {
            reply,
            prompts: Arc::clone(&prompts),
        };
        (model, prompts)
    }
}

impl ChatModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.reply.clone().map_err(|message| anyhow!(message))
    }
}

/// Chunk texts about the product, embedded with [`KeywordEmbedder`].
pub fn pickle_chunks() -> Vec<Chunk> {
    [
        "Our chicken pickle is made with bone-in country chicken.",
        "The spice blend is red chilli, turmeric and a little fenugreek.",
        "Every batch is slow-cooked in cold-pressed gingelly oil.",
        "Unopened jars have a shelf life of six months.",
        "A second spice note comes from freshly ground garlic.",
        "Store the jar in a cool dry place after opening.",
    ]
    .iter()
    .enumerate()
    .map(|(i, text)| Chunk {
        id: format!("pickle-{i}"),
        vector: KeywordEmbedder::vector_for(text),
        text: text.to_string(),
        path: "docs/chicken_pickle.txt".to_string(),
    })
    .collect()
}

/// Writes `chunks` into a fresh index directory.
pub fn write_index(dir: &Path, chunks: &[Chunk]) -> Result<()> {
    let storage = EmbeddingStorage::create(dir)?;
    storage.insert_chunks(chunks)?;
    Ok(())
}
