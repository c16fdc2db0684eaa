//! # 헬스체크(Health Check) 핸들러
//!
//! - `GET /health` → `{ "status": "ok" }`
//!
//! 데이터베이스에 `SELECT 1`을 보내 저장소까지 응답하는지 함께 확인합니다.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{error::AppError, routes::AppState};

/// `GET /health` — 서버와 데이터베이스 상태를 확인합니다.
///
/// DB 연결에 실패하면 `AppError::Database` → 500 응답이 됩니다.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    sqlx::query("SELECT 1").execute(&state.pool).await?;

    Ok(Json(json!({
        "status": "ok"
    })))
}

#[cfg(test)]
mod tests {
    use crate::{db::test_pool, routes::router, routes::AppState};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn reports_ok() {
        let app = router(AppState {
            pool: test_pool().await,
        });
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"status":"ok"}"#);
    }
}
