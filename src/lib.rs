//! reviewtag library root.
//! Clean Architecture + DDD 계층을 외부에 노출한다.

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use domain::review::{ClassificationOutcome, ClassifyOptions};
use interface::cli::AppComposition;

/// 라이브러리 직접 호출용 분류 함수.
/// 대화형 입력 없이 실행하므로 리뷰와 API key를 옵션/설정/환경변수로 넘겨야 한다.
pub async fn classify(options: ClassifyOptions) -> Result<ClassificationOutcome> {
    let composition = AppComposition::non_interactive();
    composition.classify_usecase().execute(options).await
}

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json() -> Result<String> {
    let composition = AppComposition::default();
    composition.inspect_config_usecase().execute()
}
