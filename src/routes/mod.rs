//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 구성을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `questions`: 질문 추가, 답변 추가, 날짜별 조회

pub mod health;
pub mod questions;

pub use health::*;
pub use questions::*;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 핸들러 사이에 공유되는 가변 상태는 없고, 연결 풀 핸들만 공유합니다.
/// `SqlitePool`은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

/// 전체 라우터를 구성합니다.
///
/// 각 경로는 끝의 슬래시(`/`)가 있는 형태와 없는 형태 모두 등록합니다.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/questions/", get(retrieve_questions))
        .route("/questions", get(retrieve_questions))
        .route("/questions/addQuestion/", post(create_question))
        .route("/questions/addQuestion", post(create_question))
        .route("/questions/addAnswer/", post(create_answer))
        .route("/questions/addAnswer", post(create_answer))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
