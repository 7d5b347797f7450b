use std::env;
use std::str::FromStr;

use anyhow::Context;

use crate::llm::ProviderKind;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub environment: String,
    pub llm_provider: ProviderKind,
    pub llm_model: String,
    pub google_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub ollama_base_url: String,
    pub default_temperature: f32,
    pub default_max_tokens: u32,
    pub geocoder_url: String,
    pub overpass_url: String,
    pub http_user_agent: String,
    pub request_timeout_secs: u64,
    pub otel_service_name: String,
    pub otel_exporter_endpoint: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            port: parse_var("APP_PORT", "8080")?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            llm_provider: parse_var("LLM_PROVIDER", "google")?,
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            google_api_key: env::var("GOOGLE_API_KEY").ok(),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            ollama_base_url: env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            default_temperature: parse_var("DEFAULT_TEMPERATURE", "0.4")?,
            default_max_tokens: parse_var("DEFAULT_MAX_TOKENS", "2048")?,
            geocoder_url: env::var("GEOCODER_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org/search".to_string()),
            overpass_url: env::var("OVERPASS_URL")
                .unwrap_or_else(|_| "http://overpass-api.de/api/interpreter".to_string()),
            http_user_agent: env::var("HTTP_USER_AGENT")
                .unwrap_or_else(|_| "HealthcareAssistant/1.0".to_string()),
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", "300")?,
            otel_service_name: env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| "healthcare-assistant".to_string()),
            otel_exporter_endpoint: env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:4317".to_string()),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_var<T>(name: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    parse_value(name, &raw)
}

fn parse_value<T>(name: &str, raw: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("{name} has an invalid value: {raw:?}"))
}
