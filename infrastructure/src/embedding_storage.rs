use anyhow::{bail, Context};
use domain::models::Chunk;
use rusqlite::{params, Connection, OpenFlags, Result as SqlResult};
use shared::types::Result;
use std::path::{Path, PathBuf};

/// File name of the SQLite database inside an index directory.
pub const INDEX_FILE: &str = "embeddings.db";

pub struct EmbeddingStorage {
    conn: Connection,
    db_path: PathBuf,
}

impl EmbeddingStorage {
    /// Opens an existing index directory without write access.
    pub fn open_read_only(index_dir: impl AsRef<Path>) -> Result<Self> {
        let index_dir = index_dir.as_ref();
        if !index_dir.is_dir() {
            bail!("vector index directory not found at {}", index_dir.display());
        }
        let db_path = index_dir.join(INDEX_FILE);
        if !db_path.is_file() {
            bail!("vector index file not found at {}", db_path.display());
        }
        let conn = Connection::open_with_flags(
            &db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("failed to open vector index {}", db_path.display()))?;
        Ok(Self { conn, db_path })
    }

    /// Creates (or reopens) a writable index directory, as the offline indexer does.
    pub fn create(index_dir: impl AsRef<Path>) -> Result<Self> {
        let index_dir = index_dir.as_ref();
        std::fs::create_dir_all(index_dir)?;
        let db_path = index_dir.join(INDEX_FILE);
        let conn = Connection::open(&db_path)?;
        Self::setup_db(&conn)?;
        Ok(Self { conn, db_path })
    }

    fn setup_db(conn: &Connection) -> SqlResult<()> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS embeddings (
                id TEXT PRIMARY KEY,
                vector BLOB NOT NULL,
                text TEXT NOT NULL,
                path TEXT NOT NULL DEFAULT ''
            );
            CREATE INDEX IF NOT EXISTS idx_embeddings_path ON embeddings(path);
        ",
        )
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn insert_chunks(&self, chunks: &[Chunk]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO embeddings (id, vector, text, path) VALUES (?, ?, ?, ?)",
            )?;
            for chunk in chunks {
                let vector_bytes = serde_json::to_vec(&chunk.vector)?;
                stmt.execute(params![chunk.id, vector_bytes, chunk.text, chunk.path])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Rows come back in insertion (rowid) order.
    pub fn get_all_chunks(&self) -> Result<Vec<Chunk>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, vector, text, path FROM embeddings ORDER BY rowid")
            .with_context(|| format!("{} has no embeddings table", self.db_path.display()))?;
        let mut rows = stmt.query([])?;
        let mut chunks = Vec::new();
        while let Some(row) = rows.next()? {
            let id: String = row.get(0)?;
            let vector_bytes: Vec<u8> = row.get(1)?;
            let text: String = row.get(2)?;
            let path: String = row.get(3)?;
            let vector: Vec<f32> = serde_json::from_slice(&vector_bytes)
                .with_context(|| format!("chunk {id} has a malformed vector"))?;
            chunks.push(Chunk {
                id,
                vector,
                text,
                path,
            });
        }
        Ok(chunks)
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM embeddings", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
