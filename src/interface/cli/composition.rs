//! 애플리케이션 조립(composition root) 모듈.

use crate::application::ports::InputPrompter;
use crate::application::usecases::classify_review::ClassifyReviewUseCase;
use crate::application::usecases::manage_config::{InitConfigUseCase, InspectConfigUseCase};
use crate::infrastructure::adapters::{
    ClassifierFactoryAdapter, ConfigCredentialResolver, ConsoleReporter, JsonConfigRepository,
    NoPrompter, TerminalPrompter,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    credential_resolver: ConfigCredentialResolver,
    classifier_factory: ClassifierFactoryAdapter,
    reporter: ConsoleReporter,
    prompter: Box<dyn InputPrompter>,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self::new(false)
    }
}

impl AppComposition {
    /// 터미널 입력을 쓰는 CLI용 조합.
    pub fn new(quiet: bool) -> Self {
        Self::with_prompter(quiet, Box::new(TerminalPrompter))
    }

    /// 누락 입력을 묻지 않는 조합(라이브러리 호출용).
    pub fn non_interactive() -> Self {
        Self::with_prompter(true, Box::new(NoPrompter))
    }

    /// 입력 어댑터를 외부에서 주입한다.
    pub fn with_prompter(quiet: bool, prompter: Box<dyn InputPrompter>) -> Self {
        Self {
            config_repo: JsonConfigRepository,
            credential_resolver: ConfigCredentialResolver,
            classifier_factory: ClassifierFactoryAdapter,
            reporter: ConsoleReporter::new(quiet),
            prompter,
        }
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// 설정 템플릿 생성 유스케이스를 생성한다.
    pub fn init_config_usecase(&self) -> InitConfigUseCase<'_> {
        InitConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// 리뷰 분류 유스케이스를 생성한다.
    pub fn classify_usecase(&self) -> ClassifyReviewUseCase<'_> {
        ClassifyReviewUseCase {
            config_repo: &self.config_repo,
            credential_resolver: &self.credential_resolver,
            classifier_factory: &self.classifier_factory,
            prompter: self.prompter.as_ref(),
            reporter: &self.reporter,
        }
    }
}
