//! 분류기 포트 구현 어댑터.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::Config;
use crate::application::ports::{ClassifierFactory, ReviewClassifier};
use crate::domain::review::{ApiKey, Classification, ProviderKind};
use crate::infrastructure::providers;

/// Provider 팩토리 어댑터.
pub struct ClassifierFactoryAdapter;

impl ClassifierFactory for ClassifierFactoryAdapter {
    fn build(
        &self,
        config: &Config,
        kind: ProviderKind,
        model_override: Option<&str>,
    ) -> Result<Box<dyn ReviewClassifier>> {
        let inner = providers::build_provider(config, kind, model_override)?;
        Ok(Box::new(ClassifierAdapter { inner }))
    }
}

/// 인프라 Provider를 애플리케이션 포트로 감싸는 래퍼.
struct ClassifierAdapter {
    inner: Box<dyn providers::StructuredProvider>,
}

#[async_trait]
impl ReviewClassifier for ClassifierAdapter {
    fn id(&self) -> &'static str {
        self.inner.id()
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn model(&self) -> &str {
        self.inner.model()
    }

    async fn classify(&self, prompt: &str, credential: &ApiKey) -> Result<Classification> {
        self.inner.classify(prompt, credential).await
    }
}
