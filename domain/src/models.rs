use serde::{Deserialize, Serialize};

/// A stored unit of source text plus its embedding.
///
/// Chunks are written by the offline indexer and never mutated while serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub vector: Vec<f32>,
    pub text: String,
    pub path: String,
}

/// A chunk selected by retrieval together with its similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredChunk<'a> {
    pub chunk: &'a Chunk,
    pub score: f32,
}

/// Model output returned verbatim to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
}

impl From<String> for Answer {
    fn from(text: String) -> Self {
        Self { text }
    }
}
