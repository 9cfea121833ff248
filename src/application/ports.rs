//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::Config;
use crate::domain::review::{ApiKey, Classification, ProviderKind};

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
    /// 사용자 설정 템플릿을 생성하고 경로를 반환한다(기존 파일은 유지).
    fn init_template(&self) -> Result<PathBuf>;
}

/// provider API key 해석 결과.
#[derive(Debug, Clone, Default)]
pub struct CredentialResolution {
    pub credential: Option<ApiKey>,
    /// inline / env:NAME / env:NAME (missing)
    pub source: Option<String>,
}

/// 설정/환경변수에서 provider 인증 키를 찾는 포트.
pub trait CredentialResolver: Send + Sync {
    fn resolve(&self, config: &Config, kind: ProviderKind) -> CredentialResolution;
}

/// 외부 structured-completion 호출 포트.
#[async_trait]
pub trait ReviewClassifier: Send + Sync {
    /// 내부 식별자
    fn id(&self) -> &'static str;
    /// 사용자 표시 이름
    fn name(&self) -> &'static str;
    fn model(&self) -> &str;
    /// 프롬프트를 보내고 5개 필드 레코드를 받는다.
    async fn classify(&self, prompt: &str, credential: &ApiKey) -> Result<Classification>;
}

/// 선택된 provider의 분류기를 구성하는 팩토리 포트.
pub trait ClassifierFactory: Send + Sync {
    fn build(
        &self,
        config: &Config,
        kind: ProviderKind,
        model_override: Option<&str>,
    ) -> Result<Box<dyn ReviewClassifier>>;
}

/// 누락된 입력(리뷰 본문/API key)을 사용자에게 묻는 포트.
pub trait InputPrompter: Send + Sync {
    fn read_review(&self) -> Result<Option<String>>;
    fn read_api_key(&self, provider_name: &str) -> Result<Option<String>>;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
    fn provider_status(&self, provider: &str, status: &str, extra: Option<&str>);
}
