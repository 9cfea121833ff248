//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod classifier_factory;
mod config_repository;
mod credential_resolver;
mod reporter;
mod terminal_prompter;

pub use classifier_factory::ClassifierFactoryAdapter;
pub use config_repository::JsonConfigRepository;
pub use credential_resolver::ConfigCredentialResolver;
pub use reporter::ConsoleReporter;
pub use terminal_prompter::{NoPrompter, TerminalPrompter};
