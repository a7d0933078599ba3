use anyhow::{anyhow, bail, Context};
use dotenvy::dotenv;
use shared::logging::Environment;
use shared::types::Result;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_INDEX_DIR: &str = "./vector_index";
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm";
pub const DEFAULT_LLM_MODEL: &str = "gemini-2.5-flash-lite";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Clone)]
pub struct Config {
    pub google_api_key: String,
    pub index_dir: PathBuf,
    pub ollama_base_url: String,
    pub embedding_model: String,
    pub llm_model: String,
    pub gemini_base_url: String,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
}

impl Config {
    /// Reads `.env` (if any) and then the process environment.
    pub fn load() -> Result<Self> {
        dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Result<Self> {
        let google_api_key = env::var("GOOGLE_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow!("GOOGLE_API_KEY not found in environment or .env file"))?;

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got {raw:?}"))?,
            Err(_) => DEFAULT_PORT,
        };

        let config = Self {
            google_api_key,
            index_dir: PathBuf::from(var_or("RAG_INDEX_DIR", DEFAULT_INDEX_DIR)),
            ollama_base_url: var_or("OLLAMA_BASE_URL", DEFAULT_OLLAMA_BASE_URL),
            embedding_model: var_or("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            llm_model: var_or("LLM_MODEL", DEFAULT_LLM_MODEL),
            gemini_base_url: var_or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            host: var_or("HOST", DEFAULT_HOST),
            port,
            environment: env::var("APP_ENV")
                .map(|value| Environment::parse(&value))
                .unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn validate(&self) -> Result<()> {
        if self.llm_model.trim().is_empty() {
            bail!("LLM_MODEL must not be empty");
        }
        if self.embedding_model.trim().is_empty() {
            bail!("EMBEDDING_MODEL must not be empty");
        }
        Ok(())
    }
}

// Hand-written so the API key never reaches the logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("google_api_key", &"<redacted>")
            .field("index_dir", &self.index_dir)
            .field("ollama_base_url", &self.ollama_base_url)
            .field("embedding_model", &self.embedding_model)
            .field("llm_model", &self.llm_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("environment", &self.environment)
            .finish()
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
