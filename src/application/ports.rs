//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::application::client::DisqusClient;
use crate::application::config::Config;
use crate::error::DisqusError;

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 외부 HTTP 전송 포트. 타임아웃/연결 제한은 구현체 책임이다.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// GET 요청 후 2xx 응답 본문을 그대로 반환한다.
    async fn get(&self, url: &str) -> Result<String, DisqusError>;
}

/// 디코딩된 응답 캐시 포트. 만료 정책과 동시성 제어는 구현체 책임이다.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<Value>, DisqusError>;
    async fn save(&self, key: &str, value: &Value) -> Result<(), DisqusError>;
}

/// 포럼(shortname)별 설정에 맞는 클라이언트를 조립하는 팩토리 포트.
pub trait ClientFactory: Send + Sync {
    fn build(&self, config: &Config, shortname: &str) -> Result<DisqusClient>;
}
