//! 설정 점검/템플릿 생성 유스케이스.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::ConfigRepository;

/// 현재 적용 중인 설정을 사람이 읽기 쉬운 JSON으로 반환한다.
pub struct InspectConfigUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
}

impl<'a> InspectConfigUseCase<'a> {
    pub fn execute(&self) -> Result<String> {
        self.config_repo.inspect_pretty_json()
    }
}

/// 사용자 설정 템플릿을 만든다. 이미 있으면 건드리지 않는다.
pub struct InitConfigUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
}

impl<'a> InitConfigUseCase<'a> {
    pub fn execute(&self) -> Result<PathBuf> {
        self.config_repo.init_template()
    }
}
