//! 포럼 설정에 맞춰 DisqusClient를 조립하는 팩토리 어댑터.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use crate::application::client::DisqusClient;
use crate::application::config::{Config, DEFAULT_API_KEY_ENV};
use crate::application::ports::ClientFactory;
use crate::infrastructure::cache::FileCache;
use crate::infrastructure::config::{cache_root, resolve_api_key};
use crate::infrastructure::http::ReqwestTransport;

/// reqwest 전송 + (설정된 경우) 파일 캐시를 사용하는 팩토리.
pub struct HttpClientFactory;

impl ClientFactory for HttpClientFactory {
    fn build(&self, config: &Config, shortname: &str) -> Result<DisqusClient> {
        let resolved = resolve_api_key(config, shortname);
        let api_key = resolved.key.ok_or_else(|| {
            anyhow!(
                "no Disqus API key for forum {shortname} (set `api_key`/`api_key_env` or {DEFAULT_API_KEY_ENV})"
            )
        })?;

        let transport = ReqwestTransport::new(Duration::from_millis(config.timeout_ms()));
        let mut client = DisqusClient::new(Box::new(transport), api_key, config.debug_for(shortname))
            .with_api_base(config.api_base())?
            .with_url_encoding(config.url_encoding());

        // 캐시 namespace가 있는 포럼만 캐시를 주입한다.
        if let Some(namespace) = config.cache_namespace(shortname) {
            let root = cache_root(config);
            let cache = FileCache::new(&root, namespace)
                .with_context(|| format!("invalid cache settings for forum {shortname}"))?;
            debug!(shortname, dir = %cache.dir().display(), "response cache enabled");
            client = client.with_cache(Arc::new(cache));
        }

        Ok(client)
    }
}
