//! 설정 로딩 -> 포럼별 클라이언트 조립 -> fetch 흐름을 조율하는 유스케이스.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::application::ports::{ClientFactory, ConfigRepository};
use crate::domain::echo::EchoParameters;
use crate::domain::options::FetchOptions;

#[derive(Debug, Clone)]
pub struct FetchPostsRequest {
    pub shortname: String,
    pub endpoint: String,
    pub options: FetchOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct FetchPostsOutput {
    pub content: Value,
    pub parameters: EchoParameters,
}

pub struct FetchPostsUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub client_factory: &'a dyn ClientFactory,
}

impl<'a> FetchPostsUseCase<'a> {
    pub async fn execute(&self, request: FetchPostsRequest) -> Result<FetchPostsOutput> {
        let config = self.config_repo.load()?;
        let mut client = self
            .client_factory
            .build(&config, &request.shortname)
            .with_context(|| format!("failed to configure client for forum {}", request.shortname))?;

        let content = client
            .fetch(&request.shortname, &request.options, &request.endpoint)
            .await
            .with_context(|| {
                format!(
                    "failed to fetch {} for forum {}",
                    request.endpoint, request.shortname
                )
            })?;

        Ok(FetchPostsOutput {
            content,
            parameters: client.parameters(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::application::client::{DEFAULT_ENDPOINT, DisqusClient};
    use crate::application::config::Config;
    use crate::application::ports::HttpTransport;
    use crate::domain::thread::ThreadRef;
    use crate::error::DisqusError;

    struct StaticConfig;

    impl ConfigRepository for StaticConfig {
        fn load(&self) -> Result<Config> {
            Ok(serde_json::from_value(json!({
                "defaults": { "api_key": "secret", "debug": true }
            }))?)
        }

        fn inspect_pretty_json(&self) -> Result<String> {
            Ok("{}".to_string())
        }
    }

    struct CountingTransport(Arc<AtomicUsize>);

    #[async_trait]
    impl HttpTransport for CountingTransport {
        async fn get(&self, _url: &str) -> Result<String, DisqusError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(r#"{"code":0,"response":[]}"#.to_string())
        }
    }

    struct FakeFactory(Arc<AtomicUsize>);

    impl ClientFactory for FakeFactory {
        fn build(&self, config: &Config, shortname: &str) -> Result<DisqusClient> {
            let key = config.defaults.api_key.clone().unwrap_or_default();
            Ok(DisqusClient::new(
                Box::new(CountingTransport(self.0.clone())),
                key,
                config.debug_for(shortname),
            ))
        }
    }

    #[tokio::test]
    async fn returns_content_with_echo_parameters() {
        let calls = Arc::new(AtomicUsize::new(0));
        let factory = FakeFactory(calls.clone());
        let usecase = FetchPostsUseCase {
            config_repo: &StaticConfig,
            client_factory: &factory,
        };

        let output = usecase
            .execute(FetchPostsRequest {
                shortname: "myforum".to_string(),
                endpoint: DEFAULT_ENDPOINT.to_string(),
                options: FetchOptions {
                    link: Some("http://example.com/post".to_string()),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(output.content["response"], json!([]));
        assert_eq!(
            output.parameters.id,
            Some(ThreadRef::Link("http://example.com/post".to_string()))
        );
        assert_eq!(output.parameters.api_key, "secret");
        assert!(output.parameters.debug);
    }

    #[tokio::test]
    async fn invalid_input_is_reported_with_context() {
        let calls = Arc::new(AtomicUsize::new(0));
        let factory = FakeFactory(calls.clone());
        let usecase = FetchPostsUseCase {
            config_repo: &StaticConfig,
            client_factory: &factory,
        };

        let err = usecase
            .execute(FetchPostsRequest {
                shortname: "myforum".to_string(),
                endpoint: DEFAULT_ENDPOINT.to_string(),
                options: FetchOptions::default(),
            })
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(format!("{err:#}").contains("invalid input"));
        assert!(
            err.downcast_ref::<DisqusError>()
                .is_some_and(DisqusError::is_invalid_input)
        );
    }
}
