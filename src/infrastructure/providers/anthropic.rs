//! Anthropic/Claude provider 어댑터(강제 tool 호출로 레코드를 받는다).

use anyhow::{Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::domain::review::{ApiKey, Classification, TokenUsage};

use super::api_runner::{send_json, usage_number};
use super::schema::{SCHEMA_DESCRIPTION, SCHEMA_NAME, SchemaDialect, record_json_schema};
use super::{ProviderSettings, StructuredProvider, record_from_value};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

pub struct AnthropicProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl AnthropicProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            client: settings.client,
            base_url: settings.base_url,
            model: settings.model,
        }
    }
}

/// 레코드 tool 하나만 선언하고 그 tool 사용을 강제한다.
pub(super) fn build_payload(model: &str, prompt: &str) -> Value {
    json!({
        "model": model,
        "max_tokens": MAX_TOKENS,
        "tools": [{
            "name": SCHEMA_NAME,
            "description": SCHEMA_DESCRIPTION,
            "input_schema": record_json_schema(SchemaDialect::ToolInput)
        }],
        "tool_choice": { "type": "tool", "name": SCHEMA_NAME },
        "messages": [
            { "role": "user", "content": prompt }
        ]
    })
}

pub(super) fn parse_response(provider_name: &str, response: &Value) -> Result<Classification> {
    let tool_input = response
        .get("content")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .find(|block| {
            block.get("type").and_then(Value::as_str) == Some("tool_use")
                && block.get("name").and_then(Value::as_str) == Some(SCHEMA_NAME)
        })
        .and_then(|block| block.get("input"));

    let Some(input) = tool_input else {
        let stop_reason = response
            .get("stop_reason")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        bail!("{provider_name}: response has no {SCHEMA_NAME} tool call (stop_reason: {stop_reason})");
    };

    Ok(Classification {
        record: record_from_value(provider_name, input)?,
        usage: TokenUsage::from_parts(
            usage_number(response, "/usage/input_tokens"),
            usage_number(response, "/usage/output_tokens"),
            None,
        ),
    })
}

#[async_trait]
impl StructuredProvider for AnthropicProvider {
    fn id(&self) -> &'static str {
        "anthropic"
    }

    fn name(&self) -> &'static str {
        "Claude"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn classify(&self, prompt: &str, credential: &ApiKey) -> Result<Classification> {
        let endpoint = format!("{}/messages", self.base_url.trim_end_matches('/'));
        let payload = build_payload(&self.model, prompt);

        // Anthropic API key(sk-ant-...)와 OAuth/Bearer 토큰을 모두 수용한다.
        let key = credential.expose();
        let request = if key.starts_with("sk-ant-") {
            self.client.post(endpoint).header("x-api-key", key)
        } else {
            self.client.post(endpoint).bearer_auth(key)
        }
        .header("anthropic-version", ANTHROPIC_VERSION)
        .json(&payload);

        let response = send_json(self.name(), "request Anthropic API", request).await?;
        parse_response(self.name(), &response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::review::ProductQuality;

    #[test]
    fn payload_forces_record_tool() {
        let payload = build_payload("claude-3-7-sonnet-latest", "Passage:\nMeh.");
        assert_eq!(payload["tool_choice"], json!({ "type": "tool", "name": "review_record" }));
        assert_eq!(payload["tools"][0]["name"], json!("review_record"));
        assert_eq!(payload["tools"][0]["input_schema"]["type"], json!("object"));
        assert_eq!(payload["max_tokens"], json!(1024));
    }

    #[test]
    fn reads_record_from_tool_use_block() {
        let response = json!({
            "content": [
                { "type": "text", "text": "Recording the review." },
                {
                    "type": "tool_use",
                    "id": "toolu_01",
                    "name": "review_record",
                    "input": {
                        "sentiment": "Neutral",
                        "intensity": "Moderate",
                        "quality": "Average",
                        "category": "Garden"
                    }
                }
            ],
            "stop_reason": "tool_use",
            "usage": { "input_tokens": 400, "output_tokens": 60 }
        });

        let classification = parse_response("Claude", &response).unwrap();
        assert_eq!(classification.record.quality, ProductQuality::Average);
        assert_eq!(classification.record.price, None);
        assert_eq!(classification.usage.total_tokens, Some(460));
    }

    #[test]
    fn missing_tool_call_is_an_error() {
        let response = json!({
            "content": [{ "type": "text", "text": "Sorry." }],
            "stop_reason": "end_turn"
        });
        let err = parse_response("Claude", &response).unwrap_err();
        assert!(err.to_string().contains("stop_reason: end_turn"));
    }
}
