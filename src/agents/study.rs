//! Study Agent
//!
//! Runs one of the three study modes over extracted document text and
//! reports a tagged [`Completion`] so callers decide how to present it.

use crate::agents::prompts::build_messages;
use crate::config::LLMConfig;
use crate::llm::provider::{LLMProviderConfig, LLM};
use crate::types::{AppResult, LLMRequest};
use tracing::{error, info, warn};

pub const MISSING_API_KEY_MESSAGE: &str =
    "OpenAI API key not set. Please set OPENAI_API_KEY environment variable.";

/// The transformation applied to a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyMode {
    /// Short study summary
    Summary,
    /// Headed bullet-point notes
    Notes,
    /// Score out of 10 with justification and suggestions
    Evaluate,
}

impl StudyMode {
    pub const ALL: [StudyMode; 3] = [StudyMode::Summary, StudyMode::Notes, StudyMode::Evaluate];

    /// Path segment of the action route
    pub fn route(&self) -> &'static str {
        match self {
            StudyMode::Summary => "summarize",
            StudyMode::Notes => "notes",
            StudyMode::Evaluate => "evaluate",
        }
    }

    /// Heading of the result page
    pub fn title(&self) -> &'static str {
        match self {
            StudyMode::Summary => "Summary",
            StudyMode::Notes => "Study Notes",
            StudyMode::Evaluate => "Evaluation",
        }
    }
}

impl std::fmt::Display for StudyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudyMode::Summary => write!(f, "summary"),
            StudyMode::Notes => write!(f, "notes"),
            StudyMode::Evaluate => write!(f, "evaluate"),
        }
    }
}

/// Outcome of a study-mode run
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Model output, trimmed
    Text(String),
    /// No credential configured; nothing was sent
    MissingApiKey,
    /// The upstream call failed
    Failed(String),
}

impl Completion {
    /// Text shown to the user for this outcome
    pub fn display_text(&self) -> String {
        match self {
            Completion::Text(text) => text.clone(),
            Completion::MissingApiKey => MISSING_API_KEY_MESSAGE.to_string(),
            Completion::Failed(reason) => format!("OpenAI API error: {}", reason),
        }
    }
}

pub struct StudyAgent {
    llm: Option<LLM>,
    model: String,
}

impl StudyAgent {
    /// Build the agent from configuration. Without an API key the agent
    /// never touches the network.
    pub fn from_config(config: &LLMConfig) -> AppResult<Self> {
        let llm = match &config.openai_api_key {
            Some(api_key) => Some(LLM::new(LLMProviderConfig {
                name: config.provider.clone(),
                api_key: api_key.clone(),
                api_base: config.api_base.clone(),
            })?),
            None => {
                warn!("OPENAI_API_KEY is not set; study modes will report a missing key");
                None
            }
        };

        Ok(Self {
            llm,
            model: config.model.clone(),
        })
    }

    pub fn new(llm: Option<LLM>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    /// Run `mode` over `text`.
    pub async fn run(&self, mode: StudyMode, text: &str) -> Completion {
        let Some(llm) = &self.llm else {
            return Completion::MissingApiKey;
        };

        let params = mode.generation_params();
        let request = LLMRequest {
            model: self.model.clone(),
            messages: build_messages(mode, text),
            max_tokens: Some(params.max_tokens),
            temperature: Some(params.temperature),
        };

        info!(
            %mode,
            text_len = text.len(),
            provider = %llm.provider_name(),
            model = %self.model,
            "Running study mode"
        );

        match llm.create_chat_completion(&request).await {
            Ok(response) => {
                info!(%mode, response_len = response.content.len(), "Study mode completed");
                Completion::Text(response.content.trim().to_string())
            }
            Err(e) => {
                error!(%mode, error = %e, "LLM call failed");
                let reason = match e {
                    crate::types::AppError::LLMApi(reason) => reason,
                    other => other.to_string(),
                };
                Completion::Failed(reason)
            }
        }
    }
}
