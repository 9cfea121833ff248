//! structured-completion provider 공통 모듈.
//! 각 API(OpenAI/Anthropic/Gemini)에 대상 스키마를 지정해 호출하고 결과를 `ReviewRecord`로 표준화한다.

pub mod anthropic;
pub mod gemini;
pub mod openai;
mod api_runner;
mod schema;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::application::config::{Config, ProviderConfig};
use crate::domain::review::{ApiKey, Classification, ProviderKind, ReviewRecord};

use api_runner::build_api_client;

#[async_trait]
pub trait StructuredProvider: Send + Sync {
    /// 내부 식별자(설정 키)
    fn id(&self) -> &'static str;
    /// 사용자 표시 이름
    fn name(&self) -> &'static str;
    fn model(&self) -> &str;
    /// 프롬프트를 보내고 스키마에 맞는 레코드를 받는다.
    async fn classify(&self, prompt: &str, credential: &ApiKey) -> Result<Classification>;
}

/// provider 생성 공통 입력.
pub struct ProviderSettings {
    pub client: Client,
    pub base_url: String,
    pub model: String,
}

/// 선택된 provider를 설정으로부터 구성한다.
pub fn build_provider(
    config: &Config,
    kind: ProviderKind,
    model_override: Option<&str>,
) -> Result<Box<dyn StructuredProvider>> {
    let fallback = ProviderConfig::default();
    let cfg = config.provider_config(kind).unwrap_or(&fallback);
    if !cfg.is_enabled() {
        bail!(
            "provider '{code}' is disabled. Set providers.{code}.enabled to true or pick another provider",
            code = kind.code()
        );
    }

    let model = model_override
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| cfg.model_or(kind));

    let settings = ProviderSettings {
        client: build_api_client(config.timeout_secs()),
        base_url: cfg.api_base_or(kind),
        model,
    };

    let provider: Box<dyn StructuredProvider> = match kind {
        ProviderKind::OpenAi => Box::new(openai::OpenAiProvider::new(settings)),
        ProviderKind::Anthropic => Box::new(anthropic::AnthropicProvider::new(settings)),
        ProviderKind::Gemini => Box::new(gemini::GeminiProvider::new(settings)),
    };
    Ok(provider)
}

/// 모델이 돌려준 JSON 텍스트를 레코드로 변환한다(코드펜스 허용).
pub(crate) fn parse_review_record(provider_name: &str, raw: &str) -> Result<ReviewRecord> {
    let body = strip_json_fences(raw);
    if body.is_empty() {
        bail!("{provider_name}: empty response content");
    }

    let record: ReviewRecord = serde_json::from_str(body).with_context(|| {
        format!("{provider_name}: response does not match the review record schema: {body}")
    })?;
    Ok(record.normalized())
}

/// 이미 JSON 객체로 받은 레코드(tool input 등)를 변환한다.
pub(crate) fn record_from_value(provider_name: &str, value: &Value) -> Result<ReviewRecord> {
    let record: ReviewRecord = serde_json::from_value(value.clone()).with_context(|| {
        format!("{provider_name}: response does not match the review record schema: {value}")
    })?;
    Ok(record.normalized())
}

fn strip_json_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // 여는 펜스 뒤 언어 태그(json, JSON, jsonc 등)는 첫 줄바꿈까지 건너뛴다.
    let rest = match rest.split_once('\n') {
        Some((tag, body)) if tag.trim().chars().all(|c| c.is_ascii_alphanumeric()) => body,
        _ => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::review::{ProductQuality, Sentiment};

    const RECORD: &str = r#"{"sentiment":"Positive","intensity":"High","quality":"Good","price":"Expensive","category":"Electronics"}"#;

    #[test]
    fn parses_plain_and_fenced_json() {
        let plain = parse_review_record("Test", RECORD).unwrap();
        let fenced = parse_review_record("Test", &format!("```json\n{RECORD}\n```")).unwrap();
        let bare_fence = parse_review_record("Test", &format!("```\n{RECORD}\n```")).unwrap();

        let upper_tag = parse_review_record("Test", &format!("```JSON\n{RECORD}\n```")).unwrap();
        let tag_with_space =
            parse_review_record("Test", &format!("```Json \n{RECORD}\n```\n")).unwrap();

        assert_eq!(plain, fenced);
        assert_eq!(plain, bare_fence);
        assert_eq!(plain, upper_tag);
        assert_eq!(plain, tag_with_space);
        assert_eq!(plain.sentiment, Sentiment::Positive);
        assert_eq!(plain.quality, ProductQuality::Good);
        assert_eq!(plain.price.as_deref(), Some("Expensive"));
    }

    #[test]
    fn null_and_blank_price_become_none() {
        let null_price = r#"{"sentiment":"Neutral","intensity":"Low","quality":"Average","price":null,"category":"Books"}"#;
        assert_eq!(parse_review_record("Test", null_price).unwrap().price, None);

        let blank_price = r#"{"sentiment":"Neutral","intensity":"Low","quality":"Average","price":"  ","category":"Books"}"#;
        assert_eq!(parse_review_record("Test", blank_price).unwrap().price, None);
    }

    #[test]
    fn schema_mismatch_is_reported_with_provider_name() {
        let err = parse_review_record("Test", r#"{"sentiment":"Great"}"#).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.starts_with("Test: response does not match the review record schema"));

        let err = parse_review_record("Test", "  ").unwrap_err();
        assert_eq!(err.to_string(), "Test: empty response content");
    }

    #[test]
    fn converts_tool_input_objects() {
        let value: Value = serde_json::from_str(RECORD).unwrap();
        let record = record_from_value("Test", &value).unwrap();
        assert_eq!(record.category, "Electronics");

        assert!(record_from_value("Test", &json!({ "sentiment": "Positive" })).is_err());
    }

    #[test]
    fn builds_selected_provider_with_override() {
        let config = Config::default();
        let provider = build_provider(&config, ProviderKind::Gemini, Some(" gemini-1.5-pro ")).unwrap();
        assert_eq!(provider.id(), "gemini");
        assert_eq!(provider.model(), "gemini-1.5-pro");

        let provider = build_provider(&config, ProviderKind::OpenAi, None).unwrap();
        assert_eq!(provider.name(), "OpenAI");
        assert_eq!(provider.model(), "gpt-4o-mini");
    }

    #[test]
    fn disabled_provider_is_rejected() {
        let mut config = Config::default();
        config.providers.anthropic = Some(ProviderConfig {
            enabled: Some(false),
            ..ProviderConfig::default()
        });

        let err = build_provider(&config, ProviderKind::Anthropic, None)
            .err()
            .expect("disabled provider must not build");
        assert!(err.to_string().contains("provider 'anthropic' is disabled"));
    }
}
