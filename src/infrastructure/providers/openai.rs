//! OpenAI provider 어댑터(Chat Completions + strict json_schema).

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::domain::review::{ApiKey, Classification, TokenUsage};

use super::api_runner::{collect_text, send_json, usage_number};
use super::schema::{SCHEMA_NAME, SchemaDialect, record_json_schema};
use super::{ProviderSettings, StructuredProvider, parse_review_record};

pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            client: settings.client,
            base_url: settings.base_url,
            model: settings.model,
        }
    }
}

/// strict json_schema 응답 형식을 지정한 요청 본문.
pub(super) fn build_payload(model: &str, prompt: &str) -> Value {
    json!({
        "model": model,
        "messages": [
            { "role": "user", "content": prompt }
        ],
        "response_format": {
            "type": "json_schema",
            "json_schema": {
                "name": SCHEMA_NAME,
                "strict": true,
                "schema": record_json_schema(SchemaDialect::Strict)
            }
        }
    })
}

pub(super) fn parse_response(provider_name: &str, response: &Value) -> Result<Classification> {
    let choice = response
        .pointer("/choices/0")
        .with_context(|| format!("{provider_name}: response has no choices"))?;

    if let Some(refusal) = choice
        .pointer("/message/refusal")
        .and_then(Value::as_str)
        .filter(|v| !v.trim().is_empty())
    {
        bail!("{provider_name}: model refused to classify the review: {refusal}");
    }
    if choice.get("finish_reason").and_then(Value::as_str) == Some("length") {
        bail!("{provider_name}: response was truncated before the record was complete");
    }

    let content = choice
        .pointer("/message/content")
        .map(collect_text)
        .unwrap_or_default();
    let record = parse_review_record(provider_name, &content)?;

    Ok(Classification {
        record,
        usage: TokenUsage::from_parts(
            usage_number(response, "/usage/prompt_tokens"),
            usage_number(response, "/usage/completion_tokens"),
            usage_number(response, "/usage/total_tokens"),
        ),
    })
}

#[async_trait]
impl StructuredProvider for OpenAiProvider {
    fn id(&self) -> &'static str {
        "openai"
    }

    fn name(&self) -> &'static str {
        "OpenAI"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn classify(&self, prompt: &str, credential: &ApiKey) -> Result<Classification> {
        let endpoint = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let request = self
            .client
            .post(endpoint)
            .bearer_auth(credential.expose())
            .json(&build_payload(&self.model, prompt));

        let response = send_json(self.name(), "request OpenAI API", request).await?;
        parse_response(self.name(), &response)
    }
}
