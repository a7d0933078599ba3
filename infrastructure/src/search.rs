use crate::embedding_storage::EmbeddingStorage;
use anyhow::bail;
use domain::models::{Chunk, ScoredChunk};
use rayon::prelude::*;
use shared::types::Result;
use std::cmp::Ordering;
use std::path::Path;

pub struct SearchEngine;

impl SearchEngine {
    /// Cosine similarity; a zero-length vector scores 0.0 against anything.
    pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        dot_product / (norm_a * norm_b)
    }

    /// Highest score first. NaN sorts last; ties keep their input order.
    fn rank(a: f32, b: f32) -> Ordering {
        let key = |score: f32| if score.is_nan() { f32::NEG_INFINITY } else { score };
        key(b).total_cmp(&key(a))
    }
}

/// Every chunk of a persisted index, held in memory for the life of the process.
pub struct VectorIndex {
    chunks: Vec<Chunk>,
    dimension: Option<usize>,
}

impl VectorIndex {
    pub fn new(chunks: Vec<Chunk>) -> Result<Self> {
        let dimension = chunks.first().map(|chunk| chunk.vector.len());
        if let Some(expected) = dimension {
            if expected == 0 {
                bail!("chunk {} has an empty embedding", chunks[0].id);
            }
            if let Some(odd) = chunks.iter().find(|chunk| chunk.vector.len() != expected) {
                bail!(
                    "chunk {} has {} dimensions but the index stores {}",
                    odd.id,
                    odd.vector.len(),
                    expected
                );
            }
        }
        Ok(Self { chunks, dimension })
    }

    /// Loads the index directory read-only.
    pub fn load(index_dir: impl AsRef<Path>) -> Result<Self> {
        let storage = EmbeddingStorage::open_read_only(index_dir)?;
        let chunks = storage.get_all_chunks()?;
        let index = Self::new(chunks)?;
        tracing::info!(
            path = %storage.db_path().display(),
            chunks = index.len(),
            dimension = ?index.dimension(),
            "Vector index loaded"
        );
        if index.is_empty() {
            tracing::warn!("Vector index is empty; answers will have no context");
        }
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Returns up to `top_k` chunks nearest to `query`.
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<ScoredChunk<'_>>> {
        let Some(dimension) = self.dimension else {
            return Ok(Vec::new());
        };
        if query.len() != dimension {
            bail!(
                "query embedding has {} dimensions but the index stores {}",
                query.len(),
                dimension
            );
        }

        let mut scored: Vec<ScoredChunk<'_>> = self
            .chunks
            .par_iter()
            .map(|chunk| ScoredChunk {
                chunk,
                score: SearchEngine::cosine_similarity(query, &chunk.vector),
            })
            .collect();

        scored.sort_by(|a, b| SearchEngine::rank(a.score, b.score));
        scored.truncate(top_k);
        Ok(scored)
    }
}
