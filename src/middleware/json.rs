use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON 요청 본문 추출자
///
/// `axum::Json`과 달리 메서드(GET 포함)나 Content-Type을 따지지 않고 본문을 읽습니다.
/// - 본문이 비어 있으면 `T::default()` (모든 필드 누락으로 취급)
/// - JSON이 아니거나 필드 타입이 맞지 않으면 `AppError::Validation`
#[derive(Debug)]
pub struct QnaJson<T>(pub T);

impl<S, T> FromRequest<S> for QnaJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(QnaJson(T::default()));
        }

        serde_json::from_slice(&body)
            .map(QnaJson)
            .map_err(|e| AppError::Validation(format!("Invalid JSON body: {}", e)))
    }
}
