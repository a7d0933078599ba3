pub mod config;
pub mod embedding_storage;
pub mod gemini_client;
pub mod ollama_client;
pub mod search;

#[cfg(test)]
mod stub_server;
