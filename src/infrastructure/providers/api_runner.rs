//! Provider HTTP API 호출 공용 유틸리티.

use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, info};

/// Provider API 호출용 기본 HTTP 클라이언트를 생성한다.
pub fn build_api_client(timeout_secs: u64) -> Client {
    // TLS 설정 실패 등 예외 상황에서는 기본 클라이언트로 폴백한다.
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// JSON 응답을 기대하는 요청을 전송하고 실패/파싱 오류를 표준화한다.
pub async fn send_json(
    provider_name: &str,
    action: &str,
    request: RequestBuilder,
) -> Result<Value> {
    debug!(provider = provider_name, action, "sending request");
    let started = Instant::now();

    let response = request
        .send()
        .await
        .with_context(|| format!("{provider_name}: failed to {action}"))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .with_context(|| format!("{provider_name}: failed to read {action} response body"))?;

    info!(
        provider = provider_name,
        status = status.as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "response received"
    );

    if !status.is_success() {
        bail!("{provider_name}: {action} failed ({status}): {}", body.trim());
    }

    serde_json::from_str(&body)
        .with_context(|| format!("{provider_name}: invalid JSON response while {action}"))
}

/// API 응답 구조에서 텍스트를 재귀적으로 추출한다.
pub fn collect_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.to_string(),
        Value::Array(items) => items
            .iter()
            .map(collect_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(""),
        Value::Object(map) => {
            if let Some(text) = map.get("text").and_then(Value::as_str) {
                return text.to_string();
            }
            if let Some(parts) = map.get("parts") {
                let text = collect_text(parts);
                if !text.is_empty() {
                    return text;
                }
            }
            if let Some(content) = map.get("content") {
                return collect_text(content);
            }
            String::new()
        }
        _ => String::new(),
    }
}

/// usage 블록에서 u64 값을 읽는다.
pub fn usage_number(response: &Value, pointer: &str) -> Option<u64> {
    response.pointer(pointer).and_then(Value::as_u64)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn collects_nested_text_parts() {
        let value = json!({
            "content": {
                "parts": [
                    { "text": "{\"sentiment\":" },
                    { "text": "\"Positive\"}" }
                ]
            }
        });
        assert_eq!(collect_text(&value), "{\"sentiment\":\"Positive\"}");
    }

    #[test]
    fn ignores_non_text_values() {
        assert_eq!(collect_text(&json!(42)), "");
        assert_eq!(collect_text(&json!(null)), "");
        assert_eq!(collect_text(&json!({ "role": "model" })), "");
    }
}
