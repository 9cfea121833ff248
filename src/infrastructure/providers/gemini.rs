//! Google Gemini provider 어댑터(responseSchema 지정).

use anyhow::{Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use url::Url;

use crate::domain::review::{ApiKey, Classification, TokenUsage};

use super::api_runner::{collect_text, send_json, usage_number};
use super::schema::gemini_response_schema;
use super::{ProviderSettings, StructuredProvider, parse_review_record};

pub struct GeminiProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            client: settings.client,
            base_url: settings.base_url,
            model: settings.model,
        }
    }
}

pub(super) fn build_payload(prompt: &str) -> Value {
    json!({
        "contents": [
            {
                "role": "user",
                "parts": [
                    { "text": prompt }
                ]
            }
        ],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": gemini_response_schema()
        }
    })
}

pub(super) fn parse_response(provider_name: &str, response: &Value) -> Result<Classification> {
    if let Some(reason) = response
        .pointer("/promptFeedback/blockReason")
        .and_then(Value::as_str)
    {
        bail!("{provider_name}: prompt was blocked ({reason})");
    }

    let content = response
        .pointer("/candidates/0/content")
        .map(collect_text)
        .unwrap_or_default();
    if content.trim().is_empty() {
        let finish_reason = response
            .pointer("/candidates/0/finishReason")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        bail!("{provider_name}: empty response content (finishReason: {finish_reason})");
    }

    Ok(Classification {
        record: parse_review_record(provider_name, &content)?,
        usage: TokenUsage::from_parts(
            usage_number(response, "/usageMetadata/promptTokenCount"),
            usage_number(response, "/usageMetadata/candidatesTokenCount"),
            usage_number(response, "/usageMetadata/totalTokenCount"),
        ),
    })
}

#[async_trait]
impl StructuredProvider for GeminiProvider {
    fn id(&self) -> &'static str {
        "gemini"
    }

    fn name(&self) -> &'static str {
        "Gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn classify(&self, prompt: &str, credential: &ApiKey) -> Result<Classification> {
        let endpoint = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        let payload = build_payload(prompt);
        let key = credential.expose();

        // Gemini는 API key(query) 또는 OAuth(Bearer) 방식 모두 허용한다.
        let request = if key.starts_with("AIza") {
            let mut url = Url::parse(&endpoint)?;
            url.query_pairs_mut().append_pair("key", key);
            self.client.post(url).json(&payload)
        } else {
            self.client.post(endpoint).bearer_auth(key).json(&payload)
        };

        let response = send_json(self.name(), "request Gemini API", request).await?;
        parse_response(self.name(), &response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::review::Sentiment;

    #[test]
    fn payload_requests_json_with_schema() {
        let payload = build_payload("Passage:\nLove it.");
        assert_eq!(payload["contents"][0]["parts"][0]["text"], json!("Passage:\nLove it."));
        assert_eq!(
            payload["generationConfig"]["responseMimeType"],
            json!("application/json")
        );
        assert_eq!(
            payload["generationConfig"]["responseSchema"]["type"],
            json!("OBJECT")
        );
    }

    #[test]
    fn reads_record_from_first_candidate() {
        let response = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "{\"sentiment\":\"Positive\",\"intensity\":\"Very high\",\"quality\":\"Good\",\"price\":\"Cheap for what you get\",\"category\":\"Sports\"}" }]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 180, "candidatesTokenCount": 40, "totalTokenCount": 220 }
        });

        let classification = parse_response("Gemini", &response).unwrap();
        assert_eq!(classification.record.sentiment, Sentiment::Positive);
        assert_eq!(
            classification.record.price.as_deref(),
            Some("Cheap for what you get")
        );
        assert_eq!(classification.usage.total_tokens, Some(220));
    }

    #[test]
    fn blocked_or_empty_responses_are_errors() {
        let blocked = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        let err = parse_response("Gemini", &blocked).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));

        let empty = json!({ "candidates": [{ "finishReason": "MAX_TOKENS" }] });
        let err = parse_response("Gemini", &empty).unwrap_err();
        assert!(err.to_string().contains("MAX_TOKENS"));
    }
}
