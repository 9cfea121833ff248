//! 도메인 정책(입력 길이 제한, 프롬프트 구성, 리포트 렌더링).

use crate::domain::error::TooLongError;
use crate::domain::review::{RECORD_FIELDS, ReviewRecord};

/// 리뷰 최대 길이(문자 수). 이 값 이상이면 거부한다.
pub const MAX_REVIEW_CHARS: usize = 700;
/// 가격 언급이 없을 때 리포트에 표시하는 값.
pub const PRICE_PLACEHOLDER: &str = "Not mentioned";

const PROMPT_HEADER: &str = "Extract the desired information from the product review passage below.\n\
Only extract the following properties:\n";

const PROMPT_FOOTER: &str = "Base every value on the passage only. \
If the passage says nothing about the price, leave the price empty.\n";

/// 리뷰 문자 수(유니코드 스칼라 기준).
pub fn review_length(review: &str) -> usize {
    review.chars().count()
}

/// 길이 제한을 통과하면 입력을 그대로 돌려준다.
pub fn validate_review(review: &str) -> Result<&str, TooLongError> {
    let length = review_length(review);
    if length >= MAX_REVIEW_CHARS {
        return Err(TooLongError {
            length,
            limit: MAX_REVIEW_CHARS,
        });
    }
    Ok(review)
}

/// 5개 필드 추출 지시문 + 본문으로 프롬프트를 만든다.
pub fn build_classification_prompt(review: &str) -> String {
    let mut out = String::from(PROMPT_HEADER);
    for (idx, field) in RECORD_FIELDS.iter().enumerate() {
        out.push_str(&format!("{}. {}: {}\n", idx + 1, field.name, field.description));
    }
    out.push_str(PROMPT_FOOTER);
    out.push_str("\nPassage:\n");
    out.push_str(review);
    out.push('\n');
    out
}

/// 레코드를 글머리표 텍스트로 렌더링한다.
pub fn format_report(record: &ReviewRecord) -> String {
    let price = record.price.as_deref().unwrap_or(PRICE_PLACEHOLDER);
    format!(
        "- Sentiment: {}\n- Intensity: {}\n- Quality: {}\n- Price: {}\n- Category: {}\n",
        record.sentiment, record.intensity, record.quality, price, record.category
    )
}
