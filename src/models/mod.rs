//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `question`: 날짜별 문서, 질문, 답변과 각 요청 본문
//!
//! `pub use question::*;`로 `crate::models::Question`처럼 짧게 접근할 수 있습니다.

pub mod question;

pub use question::*;
