//! # 에러 처리 모듈
//!
//! QnA 게이트웨이에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! | variant | HTTP | code |
//! |---------|------|------|
//! | `Validation` | 400 | `validation_error` |
//! | `NotFound` | 404 | `not_found` |
//! | `Persistence` | 500 | `persistence_error` |
//! | `Database` | 500 | `database_error` |
//! | `Serialization` | 500 | `serialization_error` |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 필수 필드 누락 또는 형식 오류 (HTTP 400)
    #[error("{0}")]
    Validation(String),

    /// 날짜 + question_id 조합에 해당하는 질문이 없음 (HTTP 404)
    #[error("{0}")]
    NotFound(String),

    /// 원자적 업데이트가 아무 행도 바꾸지 못함 (HTTP 500)
    #[error("{0}")]
    Persistence(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: `?` 연산자로 sqlx::Error가 자동으로 AppError::Database로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 저장된 문서 JSON을 읽거나 쓰지 못함 (HTTP 500)
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, Serialization)는 실제 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Validation(ref msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::Persistence(ref msg) => {
                tracing::error!("Persistence error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "persistence_error",
                    msg.clone(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Serialization(ref e) => {
                tracing::error!("Serialization error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "serialization_error",
                    "Stored document could not be processed".to_string(),
                )
            }
        };

        // 결과: { "error": { "code": "not_found", "message": "..." } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
