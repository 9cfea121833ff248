//! Provider API key 해석 포트 구현.

use crate::application::config::Config;
use crate::application::ports::{CredentialResolution, CredentialResolver};
use crate::domain::review::ProviderKind;
use crate::infrastructure::config::resolve_provider_api_key;

/// 설정(api_key/api_key_env)에 기반해 런타임 키를 해석한다.
pub struct ConfigCredentialResolver;

impl CredentialResolver for ConfigCredentialResolver {
    fn resolve(&self, config: &Config, kind: ProviderKind) -> CredentialResolution {
        resolve_provider_api_key(config, kind)
    }
}
