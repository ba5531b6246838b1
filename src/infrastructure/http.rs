//! reqwest 기반 HTTP 전송 구현.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::application::ports::HttpTransport;
use crate::error::DisqusError;

const USER_AGENT: &str = "disqus-relay";

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// 지정한 타임아웃을 적용한 전송 구현을 생성한다.
    pub fn new(timeout: Duration) -> Self {
        // TLS 설정 실패 등 예외 상황에서는 기본 클라이언트로 폴백한다.
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|err| {
                warn!(
                    error = %err,
                    timeout_ms = timeout.as_millis() as u64,
                    "failed to build configured HTTP client, falling back to defaults without timeout"
                );
                Client::new()
            });
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<String, DisqusError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| transport_error(url, err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| transport_error(url, err))?;

        debug!(status = status.as_u16(), bytes = body.len(), "disqus response received");

        if !status.is_success() {
            return Err(DisqusError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

fn transport_error(url: &str, err: reqwest::Error) -> DisqusError {
    DisqusError::Transport {
        // api_key가 로그/에러 메시지에 남지 않도록 쿼리를 제거한다.
        url: url.split('?').next().unwrap_or(url).to_string(),
        message: err.without_url().to_string(),
    }
}
