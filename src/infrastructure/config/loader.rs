//! 설정 파일 탐색/병합 로더.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value, json};

use crate::application::config::{Config, DEFAULT_PROVIDER, DEFAULT_TIMEOUT_SECS};
use crate::domain::review::ProviderKind;

/// 명시 설정 파일 경로를 지정하는 환경변수.
pub const CONFIG_ENV: &str = "REVIEWTAG_CONFIG";
const PROJECT_CONFIG_PATH: &str = ".reviewtag/config.json";

#[derive(Debug, Clone)]
pub(crate) struct LoadedConfig {
    pub config: Config,
    pub searched_paths: Vec<PathBuf>,
    pub loaded_paths: Vec<PathBuf>,
}

/// 우선순위 경로를 순회해 JSON 설정을 병합한다.
pub(crate) fn load_merged_config() -> Result<LoadedConfig> {
    // 명시 경로가 아직 없으면 템플릿을 먼저 만들어 둔다.
    if let Ok(path) = env::var(CONFIG_ENV)
        && !path.trim().is_empty()
        && !Path::new(&path).exists()
    {
        write_template(Path::new(&path))?;
    }

    load_from_paths(config_paths())
}

/// 주어진 경로를 낮은 우선순위부터 병합한다. 없는 파일은 건너뛴다.
pub(crate) fn load_from_paths(paths: Vec<PathBuf>) -> Result<LoadedConfig> {
    let mut merged = Config::default();
    let mut loaded_paths = Vec::new();

    for path in &paths {
        if !path.exists() {
            continue;
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let parsed: Config = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))?;
        merged.merge_from(parsed);
        loaded_paths.push(path.to_path_buf());
    }

    Ok(LoadedConfig {
        config: merged,
        searched_paths: paths,
        loaded_paths,
    })
}

/// 시스템 + 사용자 + 프로젝트 + 명시 경로 순으로 병합 경로를 구성한다.
pub fn config_paths() -> Vec<PathBuf> {
    // 낮은 우선순위 -> 높은 우선순위 순서로 병합됨.
    let mut paths = vec![PathBuf::from("/etc/reviewtag/config.json")];

    if let Some(path) = user_config_path() {
        paths.push(path);
    }

    paths.push(PathBuf::from(PROJECT_CONFIG_PATH));

    if let Ok(path) = env::var(CONFIG_ENV)
        && !path.trim().is_empty()
    {
        paths.push(PathBuf::from(path));
    }

    dedup_paths(paths)
}

/// 사용자 설정 파일 경로(`<config_dir>/reviewtag/config.json`).
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("reviewtag").join("config.json"))
}

/// `config --init` 대상 경로에 템플릿을 만든다.
/// 명시 경로 -> 사용자 경로 -> 프로젝트 경로 순으로 결정한다.
pub(crate) fn init_user_template() -> Result<PathBuf> {
    let target = env::var(CONFIG_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .or_else(user_config_path)
        .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_PATH));

    write_template(&target)?;
    Ok(target)
}

/// 템플릿 설정을 기록한다. 기존 파일은 덮어쓰지 않는다.
pub(crate) fn write_template(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        return Ok(());
    }

    if let Some(parent) = config_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let rendered = serde_json::to_string_pretty(&template_json())?;
    fs::write(config_path, format!("{rendered}\n")).with_context(|| {
        format!(
            "failed to create config template at {}",
            config_path.display()
        )
    })
}

fn template_json() -> Value {
    let mut providers = Map::new();
    for kind in ProviderKind::ALL {
        providers.insert(
            kind.code().to_string(),
            json!({
                "enabled": true,
                "model": kind.default_model(),
                "api_key_env": kind.default_api_key_env()
            }),
        );
    }

    json!({
        "defaults": {
            "provider": DEFAULT_PROVIDER.code(),
            "timeout_secs": DEFAULT_TIMEOUT_SECS
        },
        "providers": providers
    })
}

fn dedup_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for p in paths {
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_existing_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let low = dir.path().join("low.json");
        let high = dir.path().join("high.json");
        let missing = dir.path().join("missing.json");
        fs::write(
            &low,
            r#"{ "defaults": { "provider": "anthropic", "timeout_secs": 15 } }"#,
        )
        .unwrap();
        fs::write(
            &high,
            r#"{ "defaults": { "provider": "gemini" }, "providers": { "gemini": { "model": "gemini-pro" } } }"#,
        )
        .unwrap();

        let loaded =
            load_from_paths(vec![low.clone(), missing.clone(), high.clone()]).unwrap();

        assert_eq!(loaded.searched_paths, vec![low.clone(), missing, high.clone()]);
        assert_eq!(loaded.loaded_paths, vec![low, high]);
        assert_eq!(loaded.config.provider_code(), "gemini");
        assert_eq!(loaded.config.timeout_secs(), 15);
        assert_eq!(
            loaded
                .config
                .provider_config(ProviderKind::Gemini)
                .and_then(|p| p.model.as_deref()),
            Some("gemini-pro")
        );
    }

    #[test]
    fn invalid_json_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();

        let err = load_from_paths(vec![broken.clone()]).unwrap_err();
        assert!(format!("{err:#}").contains(&broken.display().to_string()));
    }

    #[test]
    fn template_is_loadable_and_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        write_template(&path).unwrap();
        let loaded = load_from_paths(vec![path.clone()]).unwrap();
        assert_eq!(loaded.config.provider_code(), "openai");
        for kind in ProviderKind::ALL {
            let provider = loaded.config.provider_config(kind).unwrap();
            assert_eq!(
                provider.api_key_env.as_deref(),
                Some(kind.default_api_key_env())
            );
        }

        fs::write(&path, r#"{ "defaults": { "provider": "gemini" } }"#).unwrap();
        write_template(&path).unwrap();
        let kept = fs::read_to_string(&path).unwrap();
        assert!(kept.contains("gemini"));
        assert!(!kept.contains("timeout_secs"));
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let paths = dedup_paths(vec![
            PathBuf::from("a"),
            PathBuf::from("b"),
            PathBuf::from("a"),
        ]);
        assert_eq!(paths, vec![PathBuf::from("a"), PathBuf::from("b")]);
    }
}
