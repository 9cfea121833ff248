//! Interface layer
//! CLI 입력 파싱과 composition root를 담당한다.

pub mod cli;
