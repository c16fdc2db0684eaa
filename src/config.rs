//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: 질문 문서를 저장할 SQLite 데이터베이스 경로
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호

use std::env;
use std::path::{Path, PathBuf};

/// 데이터베이스 이름. 기본 SQLite 파일 이름으로 쓰입니다.
pub const DATABASE_NAME: &str = "team4qna";

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후 `AppState`를 만드는 데 사용됩니다.
/// 전역 변수가 아니라 `main`에서 명시적으로 넘겨주는 값입니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (기본값: "sqlite:data/team4qna.db")
    pub database_url: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 8000)
    pub port: u16,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// 모든 항목에 기본값이 있으므로 환경변수가 하나도 없어도 동작합니다.
    /// `PORT`가 숫자로 파싱되지 않으면 기본값 8000을 사용합니다.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 조회 함수를 받아 설정을 만듭니다. 테스트에서 환경변수 대신 사용합니다.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| format!("sqlite:data/{}.db", DATABASE_NAME)),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(8000),
        }
    }

    /// 파일 기반 SQLite URL이면 데이터베이스 파일이 놓일 디렉토리를 반환합니다.
    ///
    /// - `sqlite:data/team4qna.db` → `Some("data")`
    /// - `sqlite::memory:` → `None`
    /// - `sqlite:team4qna.db` → `None` (현재 디렉토리)
    pub fn database_dir(&self) -> Option<PathBuf> {
        let path = self
            .database_url
            .strip_prefix("sqlite://")
            .or_else(|| self.database_url.strip_prefix("sqlite:"))?;
        // 쿼리 문자열(?mode=rwc 등)은 경로가 아닙니다
        let path = path.split('?').next().unwrap_or_default();
        if path.is_empty() || path.starts_with(":memory:") {
            return None;
        }

        Path::new(path)
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }
}
