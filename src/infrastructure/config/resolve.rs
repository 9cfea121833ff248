//! 설정 값(api_key/env)을 실제 런타임 인증 키로 해석하는 유틸리티.
//!
//! - 환경변수 접근은 인프라 계층에서만 수행한다.

use std::env;

use crate::application::config::{Config, ProviderConfig};
use crate::application::ports::CredentialResolution;
use crate::domain::review::{ApiKey, ProviderKind};

/// Provider API key를 해석한다. inline 값이 환경변수보다 우선한다.
pub fn resolve_provider_api_key(config: &Config, kind: ProviderKind) -> CredentialResolution {
    resolve_with(config, kind, |name| env::var(name).ok())
}

/// 환경변수 조회 함수를 주입받아 키를 해석한다.
pub(crate) fn resolve_with(
    config: &Config,
    kind: ProviderKind,
    lookup: impl Fn(&str) -> Option<String>,
) -> CredentialResolution {
    let fallback = ProviderConfig::default();
    let cfg = config.provider_config(kind).unwrap_or(&fallback);

    if let Some(key) = cfg.api_key.as_deref().and_then(ApiKey::new) {
        return CredentialResolution {
            credential: Some(key),
            source: Some("inline".to_string()),
        };
    }

    let env_name = cfg.api_key_env_or(kind);
    match lookup(&env_name).and_then(ApiKey::new) {
        Some(key) => CredentialResolution {
            credential: Some(key),
            source: Some(format!("env:{env_name}")),
        },
        None => CredentialResolution {
            credential: None,
            source: Some(format!("env:{env_name} (missing)")),
        },
    }
}
