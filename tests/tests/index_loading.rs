//! Startup behaviour of the read-only vector index.

use infrastructure::embedding_storage::INDEX_FILE;
use infrastructure::search::VectorIndex;
use tests::{pickle_chunks, write_index, KeywordEmbedder, KEYWORDS};

#[test]
fn missing_index_directory_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let err = VectorIndex::load(dir.path().join("vector_index"))
        .err()
        .expect("loading a missing index must fail");
    assert!(err.to_string().contains("not found"));
}

#[test]
fn directory_without_database_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let err = VectorIndex::load(dir.path()).err().unwrap();
    assert!(err.to_string().contains(INDEX_FILE));
}

#[test]
fn database_without_embeddings_table_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    rusqlite::Connection::open(dir.path().join(INDEX_FILE))
        .unwrap()
        .execute_batch("CREATE TABLE unrelated (x INTEGER);")
        .unwrap();
    assert!(VectorIndex::load(dir.path()).is_err());
}

#[test]
fn mixed_dimension_rows_fail_startup() {
    let dir = tempfile::tempdir().unwrap();
    let mut chunks = pickle_chunks();
    chunks[3].vector.push(0.5);
    write_index(dir.path(), &chunks).unwrap();

    let err = VectorIndex::load(dir.path()).err().unwrap();
    assert!(err.to_string().contains("pickle-3"));
}

#[test]
fn loaded_index_serves_nearest_chunks() {
    let dir = tempfile::tempdir().unwrap();
    write_index(dir.path(), &pickle_chunks()).unwrap();

    let index = VectorIndex::load(dir.path()).unwrap();
    assert_eq!(index.len(), 6);
    assert_eq!(index.dimension(), Some(KEYWORDS.len()));

    let query = KeywordEmbedder::vector_for("which oil is used?");
    let results = index.search(&query, 5).unwrap();
    assert_eq!(results.len(), 5);
    assert!(results[0].chunk.text.contains("gingelly oil"));
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
}
