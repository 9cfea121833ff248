//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use serde::{Deserialize, Serialize};

use crate::domain::review::ProviderKind;

pub const DEFAULT_PROVIDER: ProviderKind = ProviderKind::OpenAi;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// provider별 API 설정
    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// 기본 provider 코드(openai/anthropic/gemini)
    pub provider: Option<String>,
    /// HTTP 요청 타임아웃(초)
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProvidersConfig {
    pub openai: Option<ProviderConfig>,
    pub anthropic: Option<ProviderConfig>,
    pub gemini: Option<ProviderConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProviderConfig {
    /// provider 활성화 여부(기본 true)
    pub enabled: Option<bool>,
    /// 모델 식별자(선택)
    pub model: Option<String>,
    /// API 베이스 URL(선택)
    pub api_base: Option<String>,
    /// API key 직접값(민감정보: 권장하지 않음)
    pub api_key: Option<String>,
    /// API key를 읽을 환경변수 이름
    pub api_key_env: Option<String>,
}

impl Config {
    /// 설정된 기본 provider 코드. 미지정이면 openai.
    pub fn provider_code(&self) -> String {
        self.defaults
            .provider
            .clone()
            .unwrap_or_else(|| DEFAULT_PROVIDER.code().to_string())
    }

    pub fn timeout_secs(&self) -> u64 {
        self.defaults
            .timeout_secs
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn provider_config(&self, kind: ProviderKind) -> Option<&ProviderConfig> {
        match kind {
            ProviderKind::OpenAi => self.providers.openai.as_ref(),
            ProviderKind::Anthropic => self.providers.anthropic.as_ref(),
            ProviderKind::Gemini => self.providers.gemini.as_ref(),
        }
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);
        self.providers.merge_from(other.providers);
    }
}

impl DefaultsConfig {
    pub fn merge_from(&mut self, other: DefaultsConfig) {
        if other.provider.is_some() {
            self.provider = other.provider;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
    }
}

impl ProviderConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn model_or(&self, kind: ProviderKind) -> String {
        non_blank(self.model.as_deref())
            .unwrap_or_else(|| kind.default_model())
            .to_string()
    }

    pub fn api_base_or(&self, kind: ProviderKind) -> String {
        non_blank(self.api_base.as_deref())
            .unwrap_or_else(|| kind.default_api_base())
            .to_string()
    }

    pub fn api_key_env_or(&self, kind: ProviderKind) -> String {
        non_blank(self.api_key_env.as_deref())
            .unwrap_or_else(|| kind.default_api_key_env())
            .to_string()
    }

    pub fn merge_from(&mut self, other: ProviderConfig) {
        if other.enabled.is_some() {
            self.enabled = other.enabled;
        }
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.api_key_env.is_some() {
            self.api_key_env = other.api_key_env;
        }
    }
}

impl ProvidersConfig {
    pub fn merge_from(&mut self, other: ProvidersConfig) {
        merge_provider_config(&mut self.openai, other.openai);
        merge_provider_config(&mut self.anthropic, other.anthropic);
        merge_provider_config(&mut self.gemini, other.gemini);
    }
}

fn merge_provider_config(target: &mut Option<ProviderConfig>, incoming: Option<ProviderConfig>) {
    match (target.as_mut(), incoming) {
        (Some(existing), Some(next)) => existing.merge_from(next),
        (None, Some(next)) => *target = Some(next),
        _ => {}
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
