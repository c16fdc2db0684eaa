//! # 질문/답변 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | /questions/addQuestion/ | `create_question` | 날짜 문서에 질문 추가 |
//! | POST | /questions/addAnswer/ | `create_answer` | 질문에 답변 추가 |
//! | GET | /questions/ | `retrieve_questions` | 날짜별 질문/답변 조회 |
//!
//! 세 핸들러 모두 요청 필드를 JSON 본문에서 읽습니다 (`QnaJson`).
//! 조회(GET)도 예외가 아니며, 쿼리 파라미터는 사용하지 않습니다.

use crate::{
    db,
    error::AppError,
    middleware::QnaJson,
    models::*,
    routes::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;

/// 필수 문자열 필드를 꺼냅니다. 없거나 빈 문자열이면 `None`.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// "YYYY-MM-DD" 모양인지 확인합니다. 연도는 정확히 4자리, 월/일은 1~2자리 숫자.
///
/// chrono의 `%Y`는 부호, 앞 공백, 4자리 미만 연도도 받아들이므로
/// 달력 검증 전에 문자열 모양을 먼저 확인합니다.
fn is_date_shaped(date: &str) -> bool {
    let digits = |part: &str, len: std::ops::RangeInclusive<usize>| {
        len.contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };

    let mut parts = date.split('-');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day), None) => {
            digits(year, 4..=4) && digits(month, 1..=2) && digits(day, 1..=2)
        }
        _ => false,
    }
}

/// 질문을 추가합니다.
///
/// `POST /questions/addQuestion/` + `{ "title", "author_nickname", "date" }` → `201 Created`
///
/// 검증 순서:
/// 1. 세 필드 모두 비어 있지 않아야 함
/// 2. `date`가 "YYYY-MM-DD" 달력 날짜로 파싱되어야 함 (예: "2024-02-30"은 거부)
///
/// 검증을 통과하면 문서 키로는 파싱된 날짜가 아니라 보낸 문자열을 그대로 씁니다.
pub async fn create_question(
    State(state): State<AppState>,
    QnaJson(req): QnaJson<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<Question>), AppError> {
    let (Some(title), Some(author_nickname), Some(date)) = (
        present(&req.title),
        present(&req.author_nickname),
        present(&req.date),
    ) else {
        return Err(AppError::Validation(
            "title, author_nickname and date are required".to_string(),
        ));
    };

    if !is_date_shaped(date) || NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(AppError::Validation(
            "Invalid date format. Use YYYY-MM-DD".to_string(),
        ));
    }

    let question = Question::new(title, author_nickname);
    db::insert_question(&state.pool, date, &question).await?;
    tracing::debug!(date, question_id = %question.question_id, "question added");

    Ok((StatusCode::CREATED, Json(question)))
}

/// 질문에 답변을 추가합니다.
///
/// `POST /questions/addAnswer/` + `{ "date", "question_id", "content", "author_nickname" }`
///
/// 날짜와 question_id가 모두 일치하는 질문이 없으면 404를 반환합니다.
/// 날짜 형식은 여기서 검증하지 않습니다. 형식이 틀린 날짜는 어떤 문서와도
/// 일치하지 않으므로 결과적으로 404가 됩니다.
pub async fn create_answer(
    State(state): State<AppState>,
    QnaJson(req): QnaJson<CreateAnswerRequest>,
) -> Result<(StatusCode, Json<Answer>), AppError> {
    let (Some(date), Some(question_id), Some(content), Some(author_nickname)) = (
        present(&req.date),
        present(&req.question_id),
        present(&req.content),
        present(&req.author_nickname),
    ) else {
        return Err(AppError::Validation(
            "date, question_id, content and author_nickname are required".to_string(),
        ));
    };

    let answer = Answer::new(author_nickname, content);
    let added = db::insert_answer(&state.pool, date, question_id, &answer).await?;
    if !added {
        return Err(AppError::NotFound(format!(
            "No question {} on {}",
            question_id, date
        )));
    }
    tracing::debug!(date, question_id, answer_id = %answer.answer_id, "answer added");

    Ok((StatusCode::CREATED, Json(answer)))
}

/// 특정 날짜의 질문과 답변을 모두 조회합니다.
///
/// `GET /questions/` + `{ "date": "..." }` → `200 OK`
///
/// 날짜는 형식 검증 없이 문자열 그대로 비교합니다.
/// 문서가 없어도 에러가 아니며 `{ "date", "questions": [] }`를 반환합니다.
pub async fn retrieve_questions(
    State(state): State<AppState>,
    QnaJson(req): QnaJson<RetrieveQuestionsRequest>,
) -> Result<Json<DayDocument>, AppError> {
    let date = present(&req.date)
        .ok_or_else(|| AppError::Validation("date is required".to_string()))?;

    let document = db::find_day_document(&state.pool, date)
        .await?
        .unwrap_or_else(|| DayDocument::empty(date));

    Ok(Json(document))
}

#[cfg(test)]
mod tests {
    use crate::{db::test_pool, routes::router, routes::AppState};
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app() -> Router {
        router(AppState {
            pool: test_pool().await,
        })
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn add_question(app: &Router, date: &str, title: &str) -> Value {
        let (status, body) = call(
            app,
            Method::POST,
            "/questions/addQuestion/",
            json!({ "title": title, "author_nickname": "alice", "date": date }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    async fn retrieve(app: &Router, date: &str) -> Value {
        let (status, body) = call(app, Method::GET, "/questions/", json!({ "date": date })).await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    #[test]
    fn date_shape_requires_four_digit_year() {
        use super::is_date_shaped;

        for ok in ["2024-01-01", "2024-1-5", "0001-12-31"] {
            assert!(is_date_shaped(ok), "{ok}");
        }
        for bad in [
            "24-01-01",
            "+2024-01-01",
            " 2024-01-01",
            "-0001-01-01",
            "2024-01-01 ",
            "2024-001-01",
            "2024-01",
            "2024-01-01-01",
            "",
        ] {
            assert!(!is_date_shaped(bad), "{bad:?}");
        }
    }

    #[tokio::test]
    async fn create_question_returns_the_new_question() {
        let app = app().await;
        let body = add_question(&app, "2024-01-01", "What is ownership?").await;

        assert_eq!(body["title"], "What is ownership?");
        assert_eq!(body["author_nickname"], "alice");
        assert_eq!(body["upvotes"], 0);
        assert_eq!(body["answers"], json!([]));
        assert!(body["question_id"].as_str().is_some_and(|id| !id.is_empty()));
        assert!(body["created_at"].is_string());
    }

    #[tokio::test]
    async fn question_ids_are_unique_across_calls() {
        let app = app().await;
        let mut ids = std::collections::HashSet::new();
        for _ in 0..10 {
            let body = add_question(&app, "2024-01-01", "same").await;
            assert!(ids.insert(body["question_id"].as_str().unwrap().to_string()));
        }
    }

    #[tokio::test]
    async fn create_question_rejects_missing_or_malformed_fields() {
        let app = app().await;
        let cases = [
            json!({ "author_nickname": "alice", "date": "2024-01-01" }),
            json!({ "title": "", "author_nickname": "alice", "date": "2024-01-01" }),
            json!({ "title": "t", "date": "2024-01-01" }),
            json!({ "title": "t", "author_nickname": "alice" }),
            json!({ "title": "t", "author_nickname": "alice", "date": "01/01/2024" }),
            json!({ "title": "t", "author_nickname": "alice", "date": "2024-02-30" }),
            json!({ "title": 7, "author_nickname": "alice", "date": "2024-01-01" }),
            json!({ "title": "t", "author_nickname": "alice", "date": "24-01-01" }),
            json!({ "title": "t", "author_nickname": "alice", "date": "+2024-01-01" }),
            json!({ "title": "t", "author_nickname": "alice", "date": " 2024-01-01" }),
            json!({ "title": "t", "author_nickname": "alice", "date": "-0001-01-01" }),
        ];

        for case in cases {
            let (status, body) =
                call(&app, Method::POST, "/questions/addQuestion/", case).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["code"], "validation_error");
        }

        for date in [
            "2024-01-01",
            "2024-02-30",
            "01/01/2024",
            "24-01-01",
            "+2024-01-01",
            " 2024-01-01",
            "-0001-01-01",
        ] {
            assert_eq!(retrieve(&app, date).await["questions"], json!([]));
        }
    }

    #[tokio::test]
    async fn same_date_questions_share_one_document_in_order() {
        let app = app().await;
        let first = add_question(&app, "2024-01-01", "first").await;
        let second = add_question(&app, "2024-01-01", "second").await;

        let doc = retrieve(&app, "2024-01-01").await;
        assert_eq!(doc["date"], "2024-01-01");
        assert_eq!(doc["questions"], json!([first, second]));
        assert!(doc.get("_id").is_none());
    }

    #[tokio::test]
    async fn create_answer_appends_to_matching_question() {
        let app = app().await;
        let question = add_question(&app, "2024-01-01", "q").await;
        let question_id = question["question_id"].as_str().unwrap();

        let mut answers = Vec::new();
        for content in ["first", "second"] {
            let (status, body) = call(
                &app,
                Method::POST,
                "/questions/addAnswer/",
                json!({
                    "date": "2024-01-01",
                    "question_id": question_id,
                    "content": content,
                    "author_nickname": "bob",
                }),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
            assert_eq!(body["content"], content);
            assert_eq!(body["upvotes"], 0);
            answers.push(body);
        }

        let doc = retrieve(&app, "2024-01-01").await;
        assert_eq!(doc["questions"][0]["answers"], json!(answers));
    }

    #[tokio::test]
    async fn create_answer_for_unknown_pair_is_not_found() {
        let app = app().await;
        let question = add_question(&app, "2024-01-01", "q").await;
        let before = retrieve(&app, "2024-01-01").await;

        for (date, question_id) in [
            ("2024-01-01", "no-such-question"),
            ("2024-01-02", question["question_id"].as_str().unwrap()),
        ] {
            let (status, body) = call(
                &app,
                Method::POST,
                "/questions/addAnswer/",
                json!({
                    "date": date,
                    "question_id": question_id,
                    "content": "hello",
                    "author_nickname": "bob",
                }),
            )
            .await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["error"]["code"], "not_found");
        }

        assert_eq!(retrieve(&app, "2024-01-01").await, before);
        assert_eq!(retrieve(&app, "2024-01-02").await["questions"], json!([]));
    }

    #[tokio::test]
    async fn create_answer_requires_every_field() {
        let app = app().await;
        let (status, body) = call(
            &app,
            Method::POST,
            "/questions/addAnswer/",
            json!({ "date": "2024-01-01", "question_id": "q", "content": "" , "author_nickname": "bob" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn retrieve_unknown_date_returns_empty_shell() {
        let app = app().await;
        let doc = retrieve(&app, "not even a date").await;
        assert_eq!(doc, json!({ "date": "not even a date", "questions": [] }));
    }

    #[tokio::test]
    async fn retrieve_requires_date() {
        let app = app().await;
        let (status, body) = call(&app, Method::GET, "/questions/", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "validation_error");

        let request = Request::builder()
            .method(Method::GET)
            .uri("/questions/")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn retrieve_is_idempotent_and_round_trips() {
        let app = app().await;
        let question = add_question(&app, "2024-01-01", "round trip").await;

        let first = retrieve(&app, "2024-01-01").await;
        let second = retrieve(&app, "2024-01-01").await;
        assert_eq!(first, second);
        assert_eq!(first["questions"], json!([question]));
    }

    #[tokio::test]
    async fn invalid_json_body_is_a_validation_error() {
        let app = app().await;
        let request = Request::builder()
            .method(Method::POST)
            .uri("/questions/addQuestion/")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn paths_without_trailing_slash_are_served() {
        let app = app().await;
        let (status, _) = call(
            &app,
            Method::POST,
            "/questions/addQuestion",
            json!({ "title": "t", "author_nickname": "a", "date": "2024-03-01" }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = call(&app, Method::GET, "/questions", json!({ "date": "2024-03-01" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["questions"].as_array().map(Vec::len), Some(1));
    }
}
