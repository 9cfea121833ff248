//! 입력 수집/검증 단계(리뷰 본문, API key).

use anyhow::Result;
use tracing::warn;

use crate::application::config::Config;
use crate::application::usecases::classify_review::ClassifyReviewUseCase;
use crate::domain::error::InputError;
use crate::domain::policy::{MAX_REVIEW_CHARS, review_length, validate_review};
use crate::domain::review::{ApiKey, ClassifyOptions, ProviderKind};

/// 리뷰 본문을 확보하고 길이 제한/필수값 검사를 통과시킨다.
pub(super) fn collect_review(
    use_case: &ClassifyReviewUseCase<'_>,
    options: &ClassifyOptions,
) -> Result<String> {
    let review = match &options.review {
        Some(text) => text.clone(),
        None => use_case.prompter.read_review()?.unwrap_or_default(),
    };

    let length = review_length(&review);
    use_case
        .reporter
        .kv("Characters", &format!("{length} / {MAX_REVIEW_CHARS}"));

    if let Err(err) = validate_review(&review) {
        warn!(length, limit = MAX_REVIEW_CHARS, "review rejected by length check");
        return Err(err.into());
    }

    if review.trim().is_empty() {
        return Err(InputError::EmptyReview.into());
    }

    Ok(review)
}

/// CLI 값 -> 설정/환경변수 -> 대화형 입력 순으로 API key를 찾는다.
pub(super) fn collect_api_key(
    use_case: &ClassifyReviewUseCase<'_>,
    options: &ClassifyOptions,
    config: &Config,
    kind: ProviderKind,
) -> Result<ApiKey> {
    if let Some(key) = options.api_key.as_deref().and_then(ApiKey::new) {
        use_case.reporter.kv("API Key", "command line");
        return Ok(key);
    }

    let resolution = use_case.credential_resolver.resolve(config, kind);
    if let Some(key) = resolution.credential {
        use_case
            .reporter
            .kv("API Key", resolution.source.as_deref().unwrap_or("config"));
        return Ok(key);
    }

    if let Some(key) = use_case
        .prompter
        .read_api_key(kind.display_name())?
        .as_deref()
        .and_then(ApiKey::new)
    {
        use_case.reporter.kv("API Key", "prompt");
        return Ok(key);
    }

    let env = config
        .provider_config(kind)
        .map(|cfg| cfg.api_key_env_or(kind))
        .unwrap_or_else(|| kind.default_api_key_env().to_string());
    Err(InputError::MissingApiKey {
        provider: kind.display_name().to_string(),
        env,
    }
    .into())
}
