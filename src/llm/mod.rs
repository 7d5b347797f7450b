pub mod client;
pub mod openai;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub use client::LlmClient;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub purpose: String,
}

#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub content: String,
    pub model: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub finish_reason: String,
}

#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    async fn generate(&self, req: &GenerateRequest) -> anyhow::Result<GenerateResponse>;
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Google,
    OpenAi,
    Ollama,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Ollama => "ollama",
        }
    }

    pub fn server(self) -> (&'static str, i64) {
        match self {
            ProviderKind::Google => ("generativelanguage.googleapis.com", 443),
            ProviderKind::OpenAi => ("api.openai.com", 443),
            ProviderKind::Ollama => ("localhost", 11434),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" | "gemini" => Ok(ProviderKind::Google),
            "openai" => Ok(ProviderKind::OpenAi),
            "ollama" => Ok(ProviderKind::Ollama),
            other => Err(format!("unknown LLM provider {other:?}")),
        }
    }
}

/// Builds the configured provider. Credentials come from `config` and live
/// as long as the returned provider.
pub fn build_provider(config: &Config) -> anyhow::Result<Arc<dyn Provider>> {
    let provider: Arc<dyn Provider> = match config.llm_provider {
        ProviderKind::Google => {
            let key = config
                .google_api_key
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("GOOGLE_API_KEY must be set for the google provider"))?;
            Arc::new(openai::OpenAIProvider::new_google(key))
        }
        ProviderKind::OpenAi => {
            let key = config
                .openai_api_key
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY must be set for the openai provider"))?;
            Arc::new(openai::OpenAIProvider::new(key))
        }
        ProviderKind::Ollama => Arc::new(openai::OpenAIProvider::new_ollama(&config.ollama_base_url)),
    };
    Ok(provider)
}
