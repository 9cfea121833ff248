//! 리뷰 분류 요청을 종료시키는 도메인 오류.

use thiserror::Error;

/// 리뷰가 허용 길이 이상일 때(사용자가 수정 가능).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "review is too long ({length} characters). Please enter a shorter review (max {limit} characters)"
)]
pub struct TooLongError {
    pub length: usize,
    pub limit: usize,
}

/// 필수 입력 누락.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("please fill in all the required fields: the product review is empty")]
    EmptyReview,
    #[error(
        "please fill in all the required fields: no API key for {provider} (use --api-key, providers.<name>.api_key or {env})"
    )]
    MissingApiKey { provider: String, env: String },
}

/// 외부 분류 호출 실패(인증/네트워크/응답 형식 오류 등). 원인 체인을 source로 보존한다.
#[derive(Debug, Error)]
#[error("{provider}: classification failed")]
pub struct ClassificationError {
    pub provider: String,
    #[source]
    pub cause: anyhow::Error,
}

impl ClassificationError {
    pub fn new(provider: &str, cause: anyhow::Error) -> Self {
        Self {
            provider: provider.to_string(),
            cause,
        }
    }

    /// 원인 체인 전체를 한 줄로 이어 붙인 메시지.
    pub fn message(&self) -> String {
        format!("{:#}", self.cause)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use anyhow::anyhow;

    use super::*;

    #[test]
    fn classification_error_keeps_cause_chain() {
        let cause = anyhow!("503 Service Unavailable").context("OpenAI: request OpenAI API");
        let err = ClassificationError::new("OpenAI", cause);

        assert_eq!(err.to_string(), "OpenAI: classification failed");
        assert_eq!(
            err.message(),
            "OpenAI: request OpenAI API: 503 Service Unavailable"
        );

        let source = err.source().expect("cause must be exposed as source");
        assert_eq!(source.to_string(), "OpenAI: request OpenAI API");
        let root = source.source().expect("inner cause must stay in the chain");
        assert_eq!(root.to_string(), "503 Service Unavailable");
    }

    #[test]
    fn too_long_message_names_length_and_limit() {
        let err = TooLongError {
            length: 812,
            limit: 700,
        };
        assert!(err.to_string().contains("812 characters"));
        assert!(err.to_string().contains("max 700"));
    }
}
