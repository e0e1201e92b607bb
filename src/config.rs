use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Env files read at startup, in order. Variables already present in the
/// process environment are never overridden.
pub const ENV_FILES: [&str; 2] = ["api.env", ".env"];

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct LLMConfig {
    pub provider: String,
    pub openai_api_key: Option<String>,
    pub api_base: String,
    pub model: String,
}

// Hand-written so the key never ends up in logs.
impl std::fmt::Debug for LLMConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LLMConfig")
            .field("provider", &self.provider)
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<set>"))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load env files, then build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        load_env_files();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            server: ServerConfig {
                host: var("HOST", "127.0.0.1"),
                port: var("PORT", "5000")
                    .parse()
                    .context("PORT must be a valid port number")?,
            },
            llm: LLMConfig {
                provider: var("LLM_PROVIDER", "openai"),
                openai_api_key: lookup("OPENAI_API_KEY")
                    .map(|key| key.trim().to_string())
                    .filter(|key| !key.is_empty()),
                api_base: var("OPENAI_API_BASE", DEFAULT_API_BASE)
                    .trim_end_matches('/')
                    .to_string(),
                model: var("OPENAI_MODEL", DEFAULT_MODEL),
            },
            storage: StorageConfig {
                upload_dir: PathBuf::from(var("UPLOAD_FOLDER", "uploads")),
                max_upload_bytes: var("MAX_UPLOAD_BYTES", "33554432")
                    .parse()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
            },
        })
    }
}

/// Masked form of an API key showing only its last four characters.
pub fn key_hint(key: &str) -> String {
    let count = key.chars().count();
    if count > 4 {
        let tail: String = key.chars().skip(count - 4).collect();
        format!("••••{}", tail)
    } else {
        "••••".to_string()
    }
}

/// Load every env file that exists; missing files are skipped.
pub fn load_env_files() {
    for file in ENV_FILES {
        if dotenvy::from_filename(file).is_ok() {
            tracing::debug!(file, "Loaded environment file");
        }
    }
}
