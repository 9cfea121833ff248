//! 리뷰 분류 파이프라인 유스케이스.
//! validate -> build prompt -> classify -> format 순서의 단일 흐름이다.

mod input;
mod provider;

use anyhow::Result;

use crate::application::ports::{
    ClassifierFactory, ConfigRepository, CredentialResolver, InputPrompter, Reporter,
};
use crate::domain::policy::{build_classification_prompt, format_report};
use crate::domain::review::{ClassificationOutcome, ClassifyOptions};

use input::{collect_api_key, collect_review};
use provider::{build_classifier, run_classification, select_provider_kind};

/// 입력 수집부터 외부 분류 호출, 리포트 렌더링까지 전체 흐름을 조율한다.
pub struct ClassifyReviewUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub credential_resolver: &'a dyn CredentialResolver,
    pub classifier_factory: &'a dyn ClassifierFactory,
    pub prompter: &'a dyn InputPrompter,
    pub reporter: &'a dyn Reporter,
}

impl<'a> ClassifyReviewUseCase<'a> {
    /// 분류 본 실행 진입점.
    /// 길이 제한/필수값 검사에 걸리면 외부 호출 없이 종료한다.
    pub async fn execute(&self, options: ClassifyOptions) -> Result<ClassificationOutcome> {
        self.reporter.section("Review");
        let review = collect_review(self, &options)?;

        let config = self.config_repo.load()?;
        let kind = select_provider_kind(&options, &config)?;
        let credential = collect_api_key(self, &options, &config, kind)?;
        let classifier = build_classifier(self, &options, &config, kind)?;

        let prompt = build_classification_prompt(&review);
        let classification =
            run_classification(self, classifier.as_ref(), &prompt, &credential).await?;

        Ok(ClassificationOutcome {
            provider_name: classifier.name().to_string(),
            model: classifier.model().to_string(),
            report: format_report(&classification.record),
            record: classification.record,
            usage: classification.usage,
        })
    }
}
