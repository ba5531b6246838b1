//! Disqus 클라이언트 오류 분류.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DisqusError {
    /// 네트워크/캐시 접근 전에 검출되는 입력 오류
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// 연결 실패, 응답 본문 읽기 실패 등 전송 계층 오류
    #[error("disqus: request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// 2xx가 아닌 HTTP 응답
    #[error("disqus: request failed ({status}): {body}")]
    Status { status: u16, body: String },

    /// 응답 본문이 JSON이 아님
    #[error("disqus: invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// JSON이지만 객체가 아닌 응답 본문(null, 문자열, 배열 등)
    #[error("disqus: expected a JSON object response, got {0}")]
    UnexpectedBody(&'static str),

    #[error("cache: {0}")]
    Cache(String),
}

impl DisqusError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
