//! Domain layer
//! 리뷰 레코드/입력 정책/오류를 외부 시스템 의존 없이 표현한다.

pub mod error;
pub mod policy;
pub mod review;
