//! 적용 설정 진단(inspection) 뷰 모델.

use std::collections::BTreeMap;

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::resolve_provider_api_key;
use crate::application::config::{Config, DefaultsConfig, ProviderConfig};
use crate::domain::policy::MAX_REVIEW_CHARS;
use crate::domain::review::ProviderKind;

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective_defaults: EffectiveDefaults,
    pub providers: BTreeMap<String, ProviderInspection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveDefaults {
    pub provider: String,
    pub provider_known: bool,
    pub timeout_secs: u64,
    pub max_review_chars: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderInspection {
    pub configured: bool,
    pub enabled: bool,
    pub model: String,
    pub api_base: String,
    pub api_key_env: String,
    pub api_key_source: Option<String>,
    pub api_key_resolved: bool,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;
        let provider = config.provider_code();

        let providers = ProviderKind::ALL
            .into_iter()
            .map(|kind| {
                (
                    kind.code().to_string(),
                    ProviderInspection::from_config(config, kind),
                )
            })
            .collect();

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: config.defaults.clone(),
            effective_defaults: EffectiveDefaults {
                provider_known: ProviderKind::from_code(&provider).is_some(),
                provider,
                timeout_secs: config.timeout_secs(),
                max_review_chars: MAX_REVIEW_CHARS,
            },
            providers,
        }
    }
}

impl ProviderInspection {
    fn from_config(config: &Config, kind: ProviderKind) -> Self {
        let fallback = ProviderConfig::default();
        let configured = config.provider_config(kind);
        let cfg = configured.unwrap_or(&fallback);
        let resolution = resolve_provider_api_key(config, kind);

        Self {
            configured: configured.is_some(),
            enabled: cfg.is_enabled(),
            model: cfg.model_or(kind),
            api_base: cfg.api_base_or(kind),
            api_key_env: cfg.api_key_env_or(kind),
            api_key_resolved: resolution.credential.is_some(),
            api_key_source: resolution.source,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn lists_every_provider_without_leaking_keys() {
        let mut config = Config::default();
        config.defaults.provider = Some("claude".to_string());
        config.providers.openai = Some(ProviderConfig {
            api_key: Some("sk-very-secret".to_string()),
            model: Some("gpt-4o".to_string()),
            ..ProviderConfig::default()
        });

        let inspection = ConfigInspection::from_loaded(LoadedConfig {
            config,
            searched_paths: vec![PathBuf::from("a.json"), PathBuf::from("b.json")],
            loaded_paths: vec![PathBuf::from("b.json")],
        });

        assert_eq!(inspection.loaded_paths, vec!["b.json".to_string()]);
        assert_eq!(inspection.effective_defaults.provider, "claude");
        assert!(inspection.effective_defaults.provider_known);
        assert_eq!(inspection.effective_defaults.max_review_chars, 700);
        assert_eq!(inspection.providers.len(), 3);

        let openai = &inspection.providers["openai"];
        assert!(openai.configured);
        assert!(openai.api_key_resolved);
        assert_eq!(openai.api_key_source.as_deref(), Some("inline"));
        assert_eq!(openai.model, "gpt-4o");

        let gemini = &inspection.providers["gemini"];
        assert!(!gemini.configured);
        assert_eq!(gemini.model, "gemini-2.0-flash");

        let json = serde_json::to_string(&inspection).unwrap();
        assert!(!json.contains("sk-very-secret"));
    }
}
