//! Provider 선택/호출 단계.

use std::time::Instant;

use anyhow::{Result, bail};

use crate::application::config::Config;
use crate::application::ports::ReviewClassifier;
use crate::application::usecases::classify_review::ClassifyReviewUseCase;
use crate::domain::error::ClassificationError;
use crate::domain::review::{ApiKey, Classification, ClassifyOptions, ProviderKind};

/// CLI 지정값 -> 설정 기본값 순으로 provider를 결정한다.
pub(super) fn select_provider_kind(options: &ClassifyOptions, config: &Config) -> Result<ProviderKind> {
    let code = options
        .provider
        .clone()
        .unwrap_or_else(|| config.provider_code());
    let Some(kind) = ProviderKind::from_code(&code) else {
        bail!("unknown provider '{code}'. supported: openai, anthropic, gemini");
    };
    Ok(kind)
}

/// 선택된 provider 분류기를 구성한다.
pub(super) fn build_classifier(
    use_case: &ClassifyReviewUseCase<'_>,
    options: &ClassifyOptions,
    config: &Config,
    kind: ProviderKind,
) -> Result<Box<dyn ReviewClassifier>> {
    let classifier = use_case
        .classifier_factory
        .build(config, kind, options.model.as_deref())?;

    use_case.reporter.section("Provider");
    use_case.reporter.kv(
        "Provider",
        &format!("{} ({})", classifier.name(), classifier.id()),
    );
    use_case.reporter.kv("Model", classifier.model());
    Ok(classifier)
}

/// 외부 분류를 1회 실행한다. 실패는 원인을 담은 ClassificationError로 변환한다.
pub(super) async fn run_classification(
    use_case: &ClassifyReviewUseCase<'_>,
    classifier: &dyn ReviewClassifier,
    prompt: &str,
    credential: &ApiKey,
) -> Result<Classification> {
    let name = classifier.name();
    use_case.reporter.provider_status(name, "running", None);

    let started = Instant::now();
    let result = classifier.classify(prompt, credential).await;
    let elapsed = format!("{:.1}s", started.elapsed().as_secs_f32());

    match result {
        Ok(classification) => {
            use_case
                .reporter
                .provider_status(name, "done", Some(&elapsed));
            if let Some(total) = classification.usage.total_tokens {
                use_case
                    .reporter
                    .status("Usage", &format!("{total} tokens"));
            }
            Ok(classification)
        }
        Err(err) => {
            use_case
                .reporter
                .provider_status(name, "error", Some(&elapsed));
            Err(ClassificationError::new(name, err).into())
        }
    }
}
