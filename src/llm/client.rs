use std::sync::Arc;
use std::time::Instant;

use opentelemetry::KeyValue;
use tracing::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use super::{GenerateRequest, GenerateResponse, Provider, ProviderKind};
use crate::telemetry::metrics::{GEN_AI_ERROR_COUNT, GEN_AI_OPERATION_DURATION, GEN_AI_TOKEN_USAGE};

/// Single-shot text generation against one configured provider.
pub struct LlmClient {
    pub provider: Arc<dyn Provider>,
    pub kind: ProviderKind,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl LlmClient {
    /// Sends `prompt` once with the client's model settings.
    pub async fn complete(&self, prompt: String, purpose: &str) -> anyhow::Result<GenerateResponse> {
        let req = GenerateRequest {
            model: self.model.clone(),
            prompt,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            purpose: purpose.to_string(),
        };
        self.generate(&req).await
    }

    pub async fn generate(&self, req: &GenerateRequest) -> anyhow::Result<GenerateResponse> {
        let provider_name = self.provider.name().to_string();
        let (server_addr, server_port) = self.kind.server();
        let span_display_name = format!("gen_ai.chat {}", req.model);
        let start = Instant::now();

        let span = tracing::info_span!(
            "gen_ai.chat",
            otel.name = %span_display_name,
            gen_ai.operation.name = "chat",
            gen_ai.provider.name = %provider_name,
            gen_ai.request.model = %req.model,
            server.address = %server_addr,
            server.port = server_port,
            gen_ai.request.temperature = req.temperature,
            gen_ai.request.max_tokens = req.max_tokens as i64,
            gen_ai.response.model = tracing::field::Empty,
            gen_ai.usage.input_tokens = tracing::field::Empty,
            gen_ai.usage.output_tokens = tracing::field::Empty,
            gen_ai.response.finish_reasons = tracing::field::Empty,
            request.purpose = %req.purpose,
            otel.status_code = tracing::field::Empty,
            error.type = tracing::field::Empty,
        );

        span.add_event(
            "gen_ai.user.message",
            vec![KeyValue::new("gen_ai.prompt", truncate(&req.prompt, 1000))],
        );

        let result = self
            .provider
            .generate(req)
            .instrument(span.clone())
            .await
            .and_then(|resp| {
                if resp.content.trim().is_empty() {
                    Err(anyhow::anyhow!(
                        "empty completion (finish reason: {})",
                        if resp.finish_reason.is_empty() {
                            "none"
                        } else {
                            resp.finish_reason.as_str()
                        }
                    ))
                } else {
                    Ok(resp)
                }
            });

        let duration = start.elapsed().as_secs_f64();
        let provider_kv = KeyValue::new("gen_ai.provider.name", provider_name.clone());

        match result {
            Ok(resp) => {
                span.record("gen_ai.response.model", resp.model.as_str());
                span.record("gen_ai.usage.input_tokens", resp.input_tokens as i64);
                span.record("gen_ai.usage.output_tokens", resp.output_tokens as i64);
                if !resp.finish_reason.is_empty() {
                    span.record(
                        "gen_ai.response.finish_reasons",
                        resp.finish_reason.as_str(),
                    );
                }

                span.add_event(
                    "gen_ai.assistant.message",
                    vec![KeyValue::new(
                        "gen_ai.completion",
                        truncate(&resp.content, 2000),
                    )],
                );

                let op_kv = KeyValue::new("gen_ai.operation.name", "chat");
                let model_kv = KeyValue::new("gen_ai.request.model", resp.model.clone());

                for (token_type, count) in [("input", resp.input_tokens), ("output", resp.output_tokens)] {
                    GEN_AI_TOKEN_USAGE.record(
                        f64::from(count),
                        &[
                            KeyValue::new("gen_ai.token.type", token_type),
                            op_kv.clone(),
                            provider_kv.clone(),
                            model_kv.clone(),
                        ],
                    );
                }
                GEN_AI_OPERATION_DURATION.record(duration, &[op_kv, provider_kv, model_kv]);

                Ok(resp)
            }
            Err(err) => {
                span.record("otel.status_code", "ERROR");
                span.record("error.type", classify_error(&err));

                GEN_AI_ERROR_COUNT.add(
                    1,
                    &[
                        provider_kv,
                        KeyValue::new("gen_ai.request.model", req.model.clone()),
                    ],
                );

                Err(err)
            }
        }
    }
}

pub(crate) fn classify_error(err: &anyhow::Error) -> &'static str {
    let msg = err.to_string().to_lowercase();
    if msg.contains("empty completion") {
        "empty_response"
    } else if msg.contains("rate limit") || msg.contains("429") {
        "rate_limit"
    } else if msg.contains("timeout") || msg.contains("timed out") || msg.contains("deadline") {
        "timeout"
    } else if msg.contains("401")
        || msg.contains("403")
        || msg.contains("auth")
        || msg.contains("api key")
    {
        "auth_error"
    } else if msg.contains("400") || msg.contains("422") || msg.contains("invalid") {
        "invalid_request"
    } else if msg.contains("500")
        || msg.contains("502")
        || msg.contains("503")
        || msg.contains("server")
    {
        "server_error"
    } else if msg.contains("connect")
        || msg.contains("dns")
        || msg.contains("network")
        || msg.contains("reset")
    {
        "network_error"
    } else {
        "unknown_error"
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        s.char_indices()
            .take_while(|&(i, c)| i + c.len_utf8() <= max)
            .map(|(_, c)| c)
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Provider returning canned results and remembering the prompts it saw.
    pub(crate) struct ScriptedProvider {
        pub reply: Result<String, String>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        pub(crate) fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing(msg: &str) -> Self {
            Self {
                reply: Err(msg.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl Provider for ScriptedProvider {
        async fn generate(&self, req: &GenerateRequest) -> anyhow::Result<GenerateResponse> {
            self.prompts.lock().unwrap().push(req.prompt.clone());
            match &self.reply {
                Ok(text) => Ok(GenerateResponse {
                    content: text.clone(),
                    model: req.model.clone(),
                    input_tokens: 10,
                    output_tokens: 5,
                    finish_reason: "stop".to_string(),
                }),
                Err(msg) => Err(anyhow::anyhow!("{msg}")),
            }
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    pub(crate) fn client_with(provider: Arc<ScriptedProvider>) -> LlmClient {
        LlmClient {
            provider,
            kind: ProviderKind::Google,
            model: "gemini-2.0-flash".to_string(),
            temperature: 0.4,
            max_tokens: 512,
        }
    }

    #[tokio::test]
    async fn test_complete_returns_content() {
        let provider = Arc::new(ScriptedProvider::replying("Conditions:\n- flu"));
        let client = client_with(provider.clone());

        let resp = client.complete("prompt".to_string(), "test").await.unwrap();
        assert_eq!(resp.content, "Conditions:\n- flu");
        assert_eq!(resp.model, "gemini-2.0-flash");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_completion_is_error() {
        let provider = Arc::new(ScriptedProvider::replying("   \n"));
        let client = client_with(provider);

        let err = client.complete("prompt".to_string(), "test").await.unwrap_err();
        assert_eq!(classify_error(&err), "empty_response");
    }

    #[tokio::test]
    async fn test_failure_is_not_retried() {
        let provider = Arc::new(ScriptedProvider::failing("503 service unavailable"));
        let client = client_with(provider.clone());

        assert!(client.complete("prompt".to_string(), "test").await.is_err());
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn test_classify_error_categories() {
        let cases = vec![
            ("empty completion (finish reason: safety)", "empty_response"),
            ("rate limit exceeded", "rate_limit"),
            ("status 429: too many requests", "rate_limit"),
            ("request timed out", "timeout"),
            ("401 unauthorized", "auth_error"),
            ("invalid api key", "auth_error"),
            ("400 bad request", "invalid_request"),
            ("503 service unavailable", "server_error"),
            ("connection refused", "network_error"),
            ("something unexpected", "unknown_error"),
        ];

        for (msg, expected) in cases {
            let err = anyhow::anyhow!("{}", msg);
            assert_eq!(
                classify_error(&err),
                expected,
                "classify_error({msg:?}) should be {expected:?}"
            );
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 5), "hello");
        let result = truncate("hé世界!", 3);
        assert!(result.len() <= 3);
    }
}
