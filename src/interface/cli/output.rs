//! 분류 결과의 stdout 출력 형식.

use anyhow::{Context, Result};

use crate::domain::review::{ClassificationOutcome, OutputFormat};

pub const REPORT_HEADING: &str = "Key Data Extracted";

/// 텍스트 모드는 제목 + 리포트, JSON 모드는 레코드만 직렬화한다.
pub fn render_outcome(outcome: &ClassificationOutcome, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format!("{REPORT_HEADING}\n\n{}", outcome.report)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&outcome.record)
                .context("failed to serialize review record")?;
            json.push('\n');
            Ok(json)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::policy::format_report;
    use crate::domain::review::{ProductQuality, ReviewRecord, Sentiment, TokenUsage};

    fn outcome() -> ClassificationOutcome {
        let record = ReviewRecord {
            sentiment: Sentiment::Positive,
            intensity: "High".to_string(),
            quality: ProductQuality::Good,
            price: None,
            category: "Kitchen".to_string(),
        };
        ClassificationOutcome {
            provider_name: "OpenAI".to_string(),
            model: "gpt-4o-mini".to_string(),
            report: format_report(&record),
            record,
            usage: TokenUsage::default(),
        }
    }

    #[test]
    fn text_output_has_heading_then_report() {
        let text = render_outcome(&outcome(), OutputFormat::Text).unwrap();
        assert!(text.starts_with("Key Data Extracted\n\n- Sentiment: Positive\n"));
        assert!(text.contains("- Price: Not mentioned\n"));
    }

    #[test]
    fn json_output_serializes_record() {
        let text = render_outcome(&outcome(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["sentiment"], "Positive");
        assert_eq!(value["quality"], "Good");
        assert!(value["price"].is_null());
        assert_eq!(value["category"], "Kitchen");
    }
}
