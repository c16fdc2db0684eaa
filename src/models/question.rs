//! # 질문/답변 모델 정의
//!
//! 날짜별 질문 문서에서 사용하는 데이터 구조체들을 정의합니다.
//!
//! ## 구조체 역할
//! - `DayDocument`: 하나의 날짜에 올라온 모든 질문 (조회 응답용)
//! - `Question`: 질문 하나와 그 답변 목록
//! - `Answer`: 질문에 달린 답변 하나
//! - `CreateQuestionRequest` / `CreateAnswerRequest` / `RetrieveQuestionsRequest`:
//!   클라이언트가 보내는 JSON 본문
//!
//! 요청 구조체의 필드가 모두 `Option`인 이유: 필드가 빠졌을 때 Axum의 기본
//! 거부 응답 대신 핸들러가 직접 400 `validation_error`를 돌려주기 위해서입니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 날짜별 문서 — `qna` 테이블 한 행에 대응합니다.
///
/// 같은 날짜의 질문은 모두 이 문서의 `questions` 배열에 입력 순서대로 쌓입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayDocument {
    /// 문서 키. 클라이언트가 보낸 날짜 문자열 그대로 저장됩니다 (예: "2024-01-01")
    pub date: String,
    pub questions: Vec<Question>,
}

impl DayDocument {
    /// 해당 날짜에 문서가 없을 때 돌려주는 빈 문서
    pub fn empty(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            questions: Vec::new(),
        }
    }
}

/// 질문 엔티티
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// 서버가 생성하는 UUIDv4 문자열. 클라이언트가 지정할 수 없습니다.
    pub question_id: String,
    pub title: String,
    pub author_nickname: String,
    pub created_at: DateTime<Utc>,
    /// 추천 수. 스키마에만 존재하며 증가시키는 API는 없습니다.
    #[serde(default)]
    pub upvotes: u32,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl Question {
    /// 새 ID와 현재 시각으로 답변이 없는 질문을 만듭니다.
    pub fn new(title: impl Into<String>, author_nickname: impl Into<String>) -> Self {
        Self {
            question_id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            author_nickname: author_nickname.into(),
            created_at: Utc::now(),
            upvotes: 0,
            answers: Vec::new(),
        }
    }
}

/// 답변 엔티티 — 항상 정확히 하나의 질문에 속합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub answer_id: String,
    pub author_nickname: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub upvotes: u32,
}

impl Answer {
    pub fn new(author_nickname: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            answer_id: uuid::Uuid::new_v4().to_string(),
            author_nickname: author_nickname.into(),
            content: content.into(),
            created_at: Utc::now(),
            upvotes: 0,
        }
    }
}

/// 질문 생성 요청 — `POST /questions/addQuestion/`의 요청 본문
#[derive(Debug, Default, Deserialize)]
pub struct CreateQuestionRequest {
    pub title: Option<String>,
    pub author_nickname: Option<String>,
    /// "YYYY-MM-DD" 형식이어야 합니다
    pub date: Option<String>,
}

/// 답변 생성 요청 — `POST /questions/addAnswer/`의 요청 본문
#[derive(Debug, Default, Deserialize)]
pub struct CreateAnswerRequest {
    pub date: Option<String>,
    pub question_id: Option<String>,
    pub content: Option<String>,
    pub author_nickname: Option<String>,
}

/// 날짜별 조회 요청 — `GET /questions/`의 요청 본문
///
/// 조회 요청이지만 쿼리 파라미터가 아니라 본문에서 날짜를 읽습니다.
#[derive(Debug, Default, Deserialize)]
pub struct RetrieveQuestionsRequest {
    pub date: Option<String>,
}
