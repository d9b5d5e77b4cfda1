//! LLM-backed plan analysis.
//!
//! [`PlanAnalyst`] is the seam the backend talks to, so tests can swap in a
//! canned implementation without network traffic. [`RigAnalyst`] is the
//! production implementation on top of an OpenAI-compatible chat model.

use async_trait::async_trait;
use common::{PlanIndicators, PlanMetrics};
use compute::plan::{annualized_growth, irr_range};
use rig::client::completion::CompletionClient;
use rig::completion::Prompt;
use rig::providers::openai;
use tracing::{debug, info, trace};

use crate::error::{ExtractError, Result};

const METRICS_PREAMBLE: &str = "You are an insurance plan analyst.";

const SUMMARY_PREAMBLE: &str =
    "You are an insurance advisor writing for ordinary buyers. Keep it short, \
     concrete and plain text without any Markdown markup.";

const METRICS_SCHEMA: &str = r#"{"product_name": "string", "coverage_amount": "number", "coverage_term": "string", "annual_premium": "number", "payment_years": "integer", "benefit_table": [{"year": "integer", "cash_value": "number", "surrender": "number"}]}"#;

/// Connection and prompting parameters for the analysis model.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub provider: String,
    pub model: String,
    pub api_key_env: String,
    pub metrics_temperature: f64,
    pub summary_temperature: f64,
    /// Longest document slice sent to the model, in characters
    pub document_char_limit: usize,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: "openai".into(),
            model: "gpt-4o-mini".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            metrics_temperature: 0.0,
            summary_temperature: 0.7,
            document_char_limit: 12_000,
        }
    }
}

/// Turns document text into structured metrics and a short written review.
#[async_trait]
pub trait PlanAnalyst: Send + Sync {
    /// Extract the structured plan terms from raw document text.
    async fn extract_metrics(&self, document_text: &str) -> Result<PlanMetrics>;

    /// Write a plain-language assessment of an analyzed plan.
    async fn summarize(
        &self,
        metrics: &PlanMetrics,
        indicators: &PlanIndicators,
    ) -> Result<String>;
}

/// [`PlanAnalyst`] backed by a chat model through `rig`.
pub struct RigAnalyst {
    client: openai::Client,
    settings: LlmSettings,
}

impl RigAnalyst {
    /// Build an analyst from settings, reading the API key from the
    /// configured environment variable.
    pub fn from_settings(settings: LlmSettings) -> Result<Self> {
        if settings.provider.to_lowercase() != "openai" {
            return Err(ExtractError::UnsupportedProvider(settings.provider.clone()));
        }

        let api_key = std::env::var(&settings.api_key_env)
            .map_err(|_| ExtractError::Llm(format!("missing env var {}", settings.api_key_env)))?;
        let client = openai::Client::new(&api_key)
            .map_err(|e| ExtractError::Llm(format!("openai client error: {e}")))?;

        info!(model = %settings.model, "Initialized LLM analyst");
        Ok(Self { client, settings })
    }

    async fn run_prompt(&self, preamble: &str, temperature: f64, prompt: &str) -> Result<String> {
        let agent = self
            .client
            .agent(&self.settings.model)
            .preamble(preamble)
            .temperature(temperature)
            .build();

        let reply = agent
            .prompt(prompt)
            .await
            .map_err(|e| ExtractError::Llm(format!("LLM prompt failed: {e}")))?;
        Ok(reply.trim().to_string())
    }
}

#[async_trait]
impl PlanAnalyst for RigAnalyst {
    async fn extract_metrics(&self, document_text: &str) -> Result<PlanMetrics> {
        debug!(
            "Requesting plan metrics for {} characters of document text",
            document_text.len()
        );
        let prompt = metrics_prompt(&self.settings, document_text);
        let raw = self
            .run_prompt(METRICS_PREAMBLE, self.settings.metrics_temperature, &prompt)
            .await?;
        trace!("Raw metrics reply: {raw}");
        parse_metrics(&raw)
    }

    async fn summarize(
        &self,
        metrics: &PlanMetrics,
        indicators: &PlanIndicators,
    ) -> Result<String> {
        debug!(
            product = metrics.product_name.as_deref().unwrap_or(""),
            "Requesting plan summary"
        );
        let prompt = summary_prompt(metrics, indicators);
        self.run_prompt(SUMMARY_PREAMBLE, self.settings.summary_temperature, &prompt)
            .await
    }
}

fn metrics_prompt(settings: &LlmSettings, document_text: &str) -> String {
    let clipped: String = document_text
        .chars()
        .take(settings.document_char_limit)
        .collect();
    format!(
        "Extract the plan terms from the insurance document below.\n\
         Reply with strict JSON only, no explanations and no Markdown.\n\
         Schema: {METRICS_SCHEMA}\n\
         Document:\n{clipped}"
    )
}

fn summary_prompt(metrics: &PlanMetrics, indicators: &PlanIndicators) -> String {
    let product = metrics.product_name.as_deref().unwrap_or("this plan");
    let payback = match indicators.payback_year {
        Some(year) => format!("premiums are recovered in year {year}"),
        None => "premiums are not recovered within the illustrated years".to_string(),
    };
    let growth = match annualized_growth(metrics) {
        Some(growth) => format!("cash value grows about {growth}% per year"),
        None => "cash value growth cannot be annualized".to_string(),
    };
    let irr = match irr_range(&indicators.irr_trend) {
        Some((min, max)) => format!("the yearly IRR runs roughly {min:.2}% to {max:.2}%"),
        None => "no IRR could be computed".to_string(),
    };
    format!(
        "Briefly review \"{product}\": {payback}, {growth}, and {irr}. \
         Say who this plan suits, speaking to the pain points ordinary people \
         face when buying insurance."
    )
}

/// Parse the model reply into [`PlanMetrics`].
///
/// The model sometimes wraps its JSON in a code fence or a sentence of prose;
/// in that case the outermost brace pair is parsed instead.
fn parse_metrics(raw: &str) -> Result<PlanMetrics> {
    let mut metrics: PlanMetrics = match serde_json::from_str(raw) {
        Ok(metrics) => metrics,
        Err(first_error) => {
            let start = raw.find('{');
            let end = raw.rfind('}');
            match (start, end) {
                (Some(start), Some(end)) if start < end => serde_json::from_str(&raw[start..=end])
                    .map_err(|e| ExtractError::Parse(format!("LLM reply is not plan JSON: {e}")))?,
                _ => {
                    return Err(ExtractError::Parse(format!(
                        "LLM reply is not plan JSON: {first_error}"
                    )));
                }
            }
        }
    };
    metrics.normalize_years();
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_metrics_accepts_clean_json() {
        let raw = r#"{
            "product_name": "Evergreen Whole Life",
            "annual_premium": 5000.0,
            "payment_years": 10,
            "benefit_table": [{"year": 1, "cash_value": 1200.0}]
        }"#;
        let metrics = parse_metrics(raw).expect("parse");
        assert_eq!(metrics.product_name.as_deref(), Some("Evergreen Whole Life"));
        assert_eq!(metrics.payment_years, Some(10));
        assert_eq!(metrics.benefit_table.len(), 1);
        assert_eq!(metrics.coverage_amount, None);
    }

    #[test]
    fn parse_metrics_recovers_json_from_code_fence() {
        let raw = "```json\n{\"product_name\": \"Fenced\", \"benefit_table\": []}\n```";
        let metrics = parse_metrics(raw).expect("parse");
        assert_eq!(metrics.product_name.as_deref(), Some("Fenced"));
    }

    #[test]
    fn parse_metrics_recovers_json_wrapped_in_prose() {
        let raw = "Here is the extraction you asked for: {\"product_name\": \"Wrapped\"} Hope it helps!";
        let metrics = parse_metrics(raw).expect("parse");
        assert_eq!(metrics.product_name.as_deref(), Some("Wrapped"));
    }

    #[test]
    fn parse_metrics_rejects_garbage() {
        assert!(matches!(
            parse_metrics("no json here at all"),
            Err(ExtractError::Parse(_))
        ));
        assert!(matches!(
            parse_metrics("{this is not json}"),
            Err(ExtractError::Parse(_))
        ));
    }

    #[test]
    fn parse_metrics_fills_missing_years() {
        let raw = r#"{"benefit_table": [{"cash_value": 10.0}, {"cash_value": 20.0}]}"#;
        let metrics = parse_metrics(raw).expect("parse");
        let years: Vec<u32> = metrics.benefit_table.iter().map(|row| row.year).collect();
        assert_eq!(years, vec![1, 2]);
    }

    #[test]
    fn metrics_prompt_clips_long_documents() {
        let settings = LlmSettings {
            document_char_limit: 10,
            ..Default::default()
        };
        let prompt = metrics_prompt(&settings, "abcdefghijklmnopqrstuvwxyz");
        assert!(prompt.contains("abcdefghij"));
        assert!(!prompt.contains("abcdefghijk"));
    }

    #[test]
    fn metrics_prompt_carries_the_schema() {
        let prompt = metrics_prompt(&LlmSettings::default(), "doc");
        assert!(prompt.contains("benefit_table"));
        assert!(prompt.contains("cash_value"));
        assert!(prompt.contains("strict JSON only"));
    }

    #[test]
    fn summary_prompt_mentions_each_indicator() {
        let metrics = PlanMetrics {
            product_name: Some("Evergreen".to_string()),
            benefit_table: vec![
                common::BenefitRow { year: 1, cash_value: 100.0, surrender: None },
                common::BenefitRow { year: 2, cash_value: 121.0, surrender: None },
            ],
            ..Default::default()
        };
        let indicators = PlanIndicators {
            cashflows: vec![-100.0, 21.0],
            payback_year: Some(2),
            irr_trend: vec![Some(2.0), Some(5.5)],
        };

        let prompt = summary_prompt(&metrics, &indicators);

        assert!(prompt.contains("\"Evergreen\""));
        assert!(prompt.contains("recovered in year 2"));
        assert!(prompt.contains("about 10% per year"));
        assert!(prompt.contains("roughly 2.00% to 5.50%"));
    }

    #[test]
    fn summary_prompt_survives_missing_indicators() {
        let prompt = summary_prompt(&PlanMetrics::default(), &PlanIndicators::default());

        assert!(prompt.contains("this plan"));
        assert!(prompt.contains("not recovered"));
        assert!(prompt.contains("cannot be annualized"));
        assert!(prompt.contains("no IRR"));
    }

    #[test]
    fn from_settings_rejects_unknown_provider() {
        let settings = LlmSettings {
            provider: "acme".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            RigAnalyst::from_settings(settings),
            Err(ExtractError::UnsupportedProvider(provider)) if provider == "acme"
        ));
    }

    #[test]
    fn from_settings_requires_the_api_key_env() {
        let settings = LlmSettings {
            api_key_env: "PLANLENS_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            RigAnalyst::from_settings(settings),
            Err(ExtractError::Llm(_))
        ));
    }
}
