//! # 질문 문서 쿼리 모듈
//!
//! 날짜별 문서(`qna` 테이블)에 대한 쿼리 함수들입니다.
//! 모든 함수는 `SqlitePool` 참조를 받아 비동기로 실행됩니다.
//!
//! ## 테이블 구조
//! - `date`: 문서 키 (날짜 문자열, PRIMARY KEY)
//! - `questions`: 질문 배열 JSON. 각 질문은 자신의 `answers` 배열을 포함합니다.
//!
//! ## 원자성
//! 쓰기 함수는 모두 SQL 문 **하나**만 실행합니다. SQLite는 문장 단위로
//! 원자적이므로, 읽고-수정하고-쓰는 과정을 애플리케이션에서 나누지 않으면
//! 동시에 들어온 요청끼리 서로의 추가분을 덮어쓰지 않습니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

/// `qna` 테이블의 한 행. `questions`는 아직 파싱하지 않은 JSON 텍스트입니다.
#[derive(Debug, sqlx::FromRow)]
struct DayDocumentRow {
    date: String,
    questions: String,
}

impl TryFrom<DayDocumentRow> for DayDocument {
    type Error = AppError;

    fn try_from(row: DayDocumentRow) -> Result<Self, Self::Error> {
        Ok(DayDocument {
            date: row.date,
            questions: serde_json::from_str(&row.questions)?,
        })
    }
}

/// 날짜 문서에 질문을 추가합니다. 문서가 없으면 새로 만듭니다 (upsert).
///
/// `INSERT ... ON CONFLICT(date) DO UPDATE` 한 문장으로
/// "문서 찾기 또는 만들기"와 "배열 끝에 추가"를 함께 처리합니다.
/// - 새 날짜: `[question]` 배열로 행을 삽입
/// - 기존 날짜: `json_insert(questions, '$[#]', ...)`로 배열 끝에 추가
///
/// `date`는 파싱된 날짜가 아니라 클라이언트가 보낸 문자열 그대로 키로 씁니다.
///
/// ## 반환값
/// - `Err(AppError::Persistence)`: 영향받은 행이 없음
pub async fn insert_question(
    pool: &SqlitePool,
    date: &str,
    question: &Question,
) -> Result<(), AppError> {
    let payload = serde_json::to_string(question)?;

    let result = sqlx::query(
        r#"
        INSERT INTO qna (date, questions)
        VALUES (?, json_array(json(?)))
        ON CONFLICT(date) DO UPDATE
        SET questions = json_insert(qna.questions, '$[#]', json(?))
        "#,
    )
    .bind(date)
    .bind(&payload)
    .bind(&payload)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::Persistence("Failed to add the question".to_string()));
    }

    Ok(())
}

/// 날짜와 question_id가 모두 일치하는 질문의 답변 배열 끝에 답변을 추가합니다.
///
/// `WHERE` 절이 날짜 일치와 질문 존재를 함께 확인하고, `SET` 절은
/// `json_each`로 찾은 질문의 배열 위치(`$[i].answers[#]`)에 답변을 넣습니다.
/// 조회와 수정이 한 `UPDATE` 문 안에서 일어납니다.
///
/// ## 반환값
/// - `true`: 답변 추가 성공
/// - `false`: 날짜 문서가 없거나, 그 문서에 해당 질문이 없음
pub async fn insert_answer(
    pool: &SqlitePool,
    date: &str,
    question_id: &str,
    answer: &Answer,
) -> Result<bool, AppError> {
    let payload = serde_json::to_string(answer)?;

    let result = sqlx::query(
        r#"
        UPDATE qna
        SET questions = json_insert(
            questions,
            '$[' || (
                SELECT q.key FROM json_each(qna.questions) AS q
                WHERE json_extract(q.value, '$.question_id') = ?
                LIMIT 1
            ) || '].answers[#]',
            json(?)
        )
        WHERE date = ?
          AND EXISTS (
              SELECT 1 FROM json_each(qna.questions) AS q
              WHERE json_extract(q.value, '$.question_id') = ?
          )
        "#,
    )
    .bind(question_id)
    .bind(&payload)
    .bind(date)
    .bind(question_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// 날짜 문자열이 정확히 일치하는 문서를 조회합니다.
///
/// ## 반환값
/// - `Ok(Some(DayDocument))`: 문서 존재
/// - `Ok(None)`: 해당 날짜에 올라온 질문이 없음
pub async fn find_day_document(
    pool: &SqlitePool,
    date: &str,
) -> Result<Option<DayDocument>, AppError> {
    let row = sqlx::query_as::<_, DayDocumentRow>(
        "SELECT date, questions FROM qna WHERE date = ?",
    )
    .bind(date)
    .fetch_optional(pool)
    .await?;

    row.map(DayDocument::try_from).transpose()
}
