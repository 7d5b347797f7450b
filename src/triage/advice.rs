use serde::Serialize;

use crate::llm::LlmClient;
use crate::telemetry::metrics::ASSESSMENT_FALLBACKS;

use super::intake::{AgeCategory, Severity};

pub const FALLBACK_MESSAGE: &str = "Sorry, there was an error generating the response.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdviceReport {
    pub text: String,
    /// False when `text` is the fallback message.
    pub generated: bool,
}

/// The single prompt sent to the model, with the three-section answer template.
pub fn build_prompt(symptoms: &str, age_category: AgeCategory, severity: Severity) -> String {
    format!(
        "Given the following symptoms: {symptoms}, severity: {severity}, list possible conditions \
         and tailored medical advice for a {age_category}.\n\
         \n\
         Conditions:\n\
         - condition 1\n\
         - condition 2\n\
         ...\n\
         \n\
         Advice:\n\
         1. Step 1\n\
         2. Step 2\n\
         ...\n\
         \n\
         Medicine Recommendation:\n\
         - For fever: Dolo 650, Paracetamol 500mg\n\
         - For cold: Cetirizine, Vicks VapoRub\n"
    )
}

/// Asks the model once. Failures never reach the caller; they are logged and
/// answered with [`FALLBACK_MESSAGE`].
#[tracing::instrument(
    name = "symptom analysis",
    skip(llm_client, symptoms),
    fields(advice.generated, advice.chars)
)]
pub async fn query_assistant(
    llm_client: &LlmClient,
    symptoms: &str,
    age_category: AgeCategory,
    severity: Severity,
) -> AdviceReport {
    let prompt = build_prompt(symptoms, age_category, severity);

    let report = match llm_client.complete(prompt, "symptom_analysis").await {
        Ok(resp) => AdviceReport {
            text: resp.content,
            generated: true,
        },
        Err(err) => {
            tracing::error!(error = %err, "Symptom analysis failed, using fallback message");
            ASSESSMENT_FALLBACKS.add(1, &[]);
            AdviceReport {
                text: FALLBACK_MESSAGE.to_string(),
                generated: false,
            }
        }
    };

    let span = tracing::Span::current();
    span.record("advice.generated", report.generated);
    span.record("advice.chars", report.text.len() as u64);

    report
}
