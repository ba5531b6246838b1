//! Disqus API 클라이언트.
//! 옵션 정규화 -> URL 조립 -> (캐시 조회) -> GET -> 아바타 정규화 순으로 동작한다.

use std::sync::Arc;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha1::{Digest, Sha1};
use tracing::{debug, info, warn};
use url::Url;

use crate::application::ports::{HttpTransport, ResponseCache};
use crate::domain::avatar::normalize_default_avatars;
use crate::domain::echo::EchoParameters;
use crate::domain::options::FetchOptions;
use crate::domain::thread::ThreadRef;
use crate::error::DisqusError;

pub const DEFAULT_API_BASE: &str = "https://disqus.com/api/3.0/";
pub const DEFAULT_ENDPOINT: &str = "threads/listPosts";
const RESPONSE_FORMAT: &str = "json";

// RFC 3986 unreserved 문자는 그대로 둔다.
const URL_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// URL에 끼워 넣는 값(shortname/식별자/api key)의 인코딩 정책.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlEncoding {
    /// 값을 그대로 붙인다. 예약 문자 처리는 호출자 책임.
    #[default]
    Raw,
    /// 각 값을 percent-encoding 한다.
    Percent,
}

impl UrlEncoding {
    fn apply(self, value: &str) -> String {
        match self {
            Self::Raw => value.to_string(),
            Self::Percent => utf8_percent_encode(value, URL_COMPONENT).to_string(),
        }
    }
}

pub struct DisqusClient {
    transport: Box<dyn HttpTransport>,
    cache: Option<Arc<dyn ResponseCache>>,
    api_key: String,
    debug: bool,
    api_base: String,
    encoding: UrlEncoding,

    // 마지막으로 성공한 fetch의 echo 값
    shortname: Option<String>,
    thread: Option<ThreadRef>,
}

impl DisqusClient {
    /// 캐시 없이 동작하는 클라이언트를 생성한다.
    pub fn new(transport: Box<dyn HttpTransport>, api_key: impl Into<String>, debug: bool) -> Self {
        Self {
            transport,
            cache: None,
            api_key: api_key.into(),
            debug,
            api_base: DEFAULT_API_BASE.to_string(),
            encoding: UrlEncoding::default(),
            shortname: None,
            thread: None,
        }
    }

    /// 응답 캐시를 주입한다.
    pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// API 루트 URL을 교체한다. 끝의 `/`는 보정한다.
    pub fn with_api_base(mut self, api_base: &str) -> Result<Self, DisqusError> {
        let normalized = format!("{}/", api_base.trim_end_matches('/'));
        Url::parse(&normalized).map_err(|err| {
            DisqusError::invalid_input(format!("invalid api base '{api_base}': {err}"))
        })?;
        self.api_base = normalized;
        Ok(self)
    }

    pub fn with_url_encoding(mut self, encoding: UrlEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    /// 기본 엔드포인트(threads/listPosts)로 스레드 코멘트를 조회한다.
    pub async fn fetch_posts(
        &mut self,
        shortname: &str,
        options: &FetchOptions,
    ) -> Result<Value, DisqusError> {
        self.fetch(shortname, options, DEFAULT_ENDPOINT).await
    }

    /// 요청 한 건을 수행한다.
    /// 입력 오류는 캐시/네트워크 접근 전에 반환되며, 실패 시 echo 값은 갱신되지 않는다.
    pub async fn fetch(
        &mut self,
        shortname: &str,
        options: &FetchOptions,
        endpoint: &str,
    ) -> Result<Value, DisqusError> {
        if shortname.trim().is_empty() {
            return Err(DisqusError::invalid_input("forum shortname must not be empty"));
        }

        let normalized = options.normalize()?;
        let thread = ThreadRef::select(&normalized)?;
        let url = self.build_url(shortname, &thread, endpoint);
        let key = cache_key(&url);

        debug!(
            url = %self.redact(&url),
            thread = ?thread,
            key = %key,
            "disqus request prepared"
        );

        // 캐시 장애는 miss로 취급하고, 저장 실패는 응답을 버리지 않는다.
        let mut content = match &self.cache {
            Some(cache) => {
                let cached = cache.load(&key).await.unwrap_or_else(|err| {
                    warn!(key = %key, error = %err, "cache load failed, treating as miss");
                    None
                });
                match cached {
                    Some(cached) => {
                        debug!(key = %key, "cache hit");
                        cached
                    }
                    None => {
                        debug!(key = %key, "cache miss");
                        let fetched = self.request_json(&url).await?;
                        if let Err(err) = cache.save(&key, &fetched).await {
                            warn!(key = %key, error = %err, "cache save failed");
                        }
                        fetched
                    }
                }
            }
            None => self.request_json(&url).await?,
        };

        let rewritten = normalize_default_avatars(&mut content);
        let posts = content
            .get("response")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        info!(shortname, endpoint, posts, rewritten, "disqus fetch completed");

        self.shortname = Some(shortname.to_string());
        self.thread = Some(thread);

        Ok(content)
    }

    /// 요청 URL을 조립한다.
    /// `<api_base><endpoint>.json?thread<fragment>&forum=<shortname>&api_key=<key>`
    pub fn build_url(&self, shortname: &str, thread: &ThreadRef, endpoint: &str) -> String {
        let fragment = thread.query_fragment(&self.encoding.apply(thread.value()));
        format!(
            "{}{}.{}?thread{}&forum={}&api_key={}",
            self.api_base,
            endpoint,
            RESPONSE_FORMAT,
            fragment,
            self.encoding.apply(shortname),
            self.encoding.apply(&self.api_key)
        )
    }

    /// 마지막으로 성공한 fetch 기준의 echo 파라미터.
    pub fn parameters(&self) -> EchoParameters {
        EchoParameters {
            id: self.thread.clone(),
            shortname: self.shortname.clone(),
            debug: self.debug,
            api_key: self.api_key.clone(),
        }
    }

    /// 로그용 URL. api_key 값은 가린다.
    fn redact(&self, url: &str) -> String {
        let encoded = self.encoding.apply(&self.api_key);
        if encoded.is_empty() {
            return url.to_string();
        }
        url.replace(&format!("api_key={encoded}"), "api_key=***")
    }

    /// 응답 본문은 JSON 객체여야 한다. null/문자열/배열은 캐시되지 않고 오류가 된다.
    async fn request_json(&self, url: &str) -> Result<Value, DisqusError> {
        let body = self.transport.get(url).await?;
        let value: Value = serde_json::from_str(&body)?;
        if !value.is_object() {
            return Err(DisqusError::UnexpectedBody(json_kind(&value)));
        }
        Ok(value)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// 캐시 키: URL 문자열의 SHA-1 hex digest.
pub fn cache_key(url: &str) -> String {
    hex::encode(Sha1::digest(url.as_bytes()))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::domain::avatar::DEFAULT_AVATAR_URL;
    use crate::infrastructure::cache::MemoryCache;

    struct FakeTransport {
        body: String,
        calls: Arc<AtomicUsize>,
        urls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl HttpTransport for FakeTransport {
        async fn get(&self, url: &str) -> Result<String, DisqusError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.urls.lock().unwrap().push(url.to_string());
            Ok(self.body.clone())
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl HttpTransport for FailingTransport {
        async fn get(&self, url: &str) -> Result<String, DisqusError> {
            Err(DisqusError::Status {
                status: 500,
                body: format!("boom at {url}"),
            })
        }
    }

    fn client_with_body(body: &str) -> (DisqusClient, Arc<AtomicUsize>, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let urls = Arc::new(Mutex::new(Vec::new()));
        let transport = FakeTransport {
            body: body.to_string(),
            calls: calls.clone(),
            urls: urls.clone(),
        };
        (DisqusClient::new(Box::new(transport), "k", false), calls, urls)
    }

    fn thread_options(identifier: &str) -> FetchOptions {
        FetchOptions {
            identifier: Some(identifier.to_string()),
            ..Default::default()
        }
    }

    fn sample_body() -> String {
        json!({
            "code": 0,
            "response": [
                { "id": "1", "author": { "avatar": { "cache": "http://www.gravatar.com/avatar.php?gravatar_id=1" } } },
                { "id": "2", "author": { "avatar": { "cache": "http://mediacdn.disqus.com/uploads/2.jpg" } } }
            ]
        })
        .to_string()
    }

    #[test]
    fn builds_identifier_url() {
        let (client, _, _) = client_with_body("{}");
        let url = client.build_url(
            "myforum",
            &ThreadRef::Identifier("t1".to_string()),
            "threads/listPosts",
        );
        assert_eq!(
            url,
            "https://disqus.com/api/3.0/threads/listPosts.json?thread:ident=t1&forum=myforum&api_key=k"
        );
    }

    #[test]
    fn raw_encoding_keeps_reserved_characters() {
        let (client, _, _) = client_with_body("{}");
        let url = client.build_url(
            "myforum",
            &ThreadRef::Link("http://example.com/a?b=c".to_string()),
            DEFAULT_ENDPOINT,
        );
        assert!(url.contains("?thread:link=http://example.com/a?b=c&forum=myforum"));
    }

    #[test]
    fn percent_encoding_escapes_interpolated_values() {
        let (client, _, _) = client_with_body("{}");
        let client = client.with_url_encoding(UrlEncoding::Percent);
        let url = client.build_url(
            "my forum",
            &ThreadRef::Link("http://example.com/a?b=c".to_string()),
            DEFAULT_ENDPOINT,
        );
        assert_eq!(
            url,
            "https://disqus.com/api/3.0/threads/listPosts.json?thread:link=http%3A%2F%2Fexample.com%2Fa%3Fb%3Dc&forum=my%20forum&api_key=k"
        );
    }

    #[test]
    fn api_base_gets_trailing_slash() {
        let (client, _, _) = client_with_body("{}");
        let client = client.with_api_base("http://localhost:8080/api/3.0").unwrap();
        let url = client.build_url("f", &ThreadRef::Id("7".to_string()), "threads/details");
        assert_eq!(
            url,
            "http://localhost:8080/api/3.0/threads/details.json?thread=7&forum=f&api_key=k"
        );

        let (client, _, _) = client_with_body("{}");
        assert!(client.with_api_base("not a url").is_err());
    }

    #[test]
    fn cache_key_is_sha1_hex_of_url() {
        assert_eq!(cache_key("abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(cache_key("abc").len(), 40);
    }

    #[tokio::test]
    async fn fetch_rewrites_default_avatar_and_records_echo() {
        let (mut client, calls, urls) = client_with_body(&sample_body());

        let content = client
            .fetch("myforum", &thread_options("t1"), DEFAULT_ENDPOINT)
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            urls.lock().unwrap()[0],
            "https://disqus.com/api/3.0/threads/listPosts.json?thread:ident=t1&forum=myforum&api_key=k"
        );
        assert_eq!(
            content["response"][0]["author"]["avatar"]["cache"],
            DEFAULT_AVATAR_URL
        );
        assert_eq!(
            content["response"][1]["author"]["avatar"]["cache"],
            "http://mediacdn.disqus.com/uploads/2.jpg"
        );

        let echo = client.parameters();
        assert_eq!(echo.id, Some(ThreadRef::Identifier("t1".to_string())));
        assert_eq!(echo.shortname.as_deref(), Some("myforum"));
        assert_eq!(echo.api_key, "k");
        assert!(!echo.debug);
    }

    #[tokio::test]
    async fn missing_identifier_fails_without_request() {
        let (mut client, calls, _) = client_with_body(&sample_body());

        let err = client
            .fetch_posts("myforum", &FetchOptions::default())
            .await
            .unwrap_err();

        assert!(err.is_invalid_input());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(client.parameters().id, None);
        assert_eq!(client.parameters().shortname, None);
    }

    #[tokio::test]
    async fn invalid_options_fail_before_cache_access() {
        let (client, calls, _) = client_with_body(&sample_body());
        let cache = Arc::new(MemoryCache::default());
        let mut client = client.with_cache(cache.clone());

        let options = FetchOptions {
            order: Some("sideways".to_string()),
            ..thread_options("t1")
        };
        let err = client.fetch_posts("myforum", &options).await.unwrap_err();

        assert!(err.is_invalid_input());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn empty_shortname_is_rejected() {
        let (mut client, calls, _) = client_with_body(&sample_body());
        let err = client.fetch_posts("  ", &thread_options("t1")).await.unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn cached_value_is_returned_without_request() {
        let (client, calls, _) = client_with_body(&sample_body());
        let url = client.build_url(
            "myforum",
            &ThreadRef::Identifier("t1".to_string()),
            DEFAULT_ENDPOINT,
        );
        let cache = Arc::new(MemoryCache::default());
        let stored = json!({
            "response": [
                { "author": { "avatar": { "cache": "http://www.gravatar.com/avatar.php?cached" } } }
            ]
        });
        cache.save(&cache_key(&url), &stored).await.unwrap();
        let mut client = client.with_cache(cache.clone());

        let content = client.fetch_posts("myforum", &thread_options("t1")).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            content["response"][0]["author"]["avatar"]["cache"],
            DEFAULT_AVATAR_URL
        );
    }

    #[tokio::test]
    async fn cache_miss_populates_cache_once() {
        let (client, calls, _) = client_with_body(&sample_body());
        let cache = Arc::new(MemoryCache::default());
        let mut client = client.with_cache(cache.clone());

        client.fetch_posts("myforum", &thread_options("t1")).await.unwrap();
        client.fetch_posts("myforum", &thread_options("t1")).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn without_cache_every_fetch_hits_transport() {
        let (mut client, calls, _) = client_with_body(&sample_body());

        client.fetch_posts("myforum", &thread_options("t1")).await.unwrap();
        client.fetch_posts("myforum", &thread_options("t1")).await.unwrap();

        assert!(!client.has_cache());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalid_json_is_a_decode_error_and_not_cached() {
        let (client, _, _) = client_with_body("<html>maintenance</html>");
        let cache = Arc::new(MemoryCache::default());
        let mut client = client.with_cache(cache.clone());

        let err = client.fetch_posts("myforum", &thread_options("t1")).await.unwrap_err();

        assert!(matches!(err, DisqusError::Decode(_)));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_propagates_without_echo() {
        let mut client = DisqusClient::new(Box::new(FailingTransport), "k", true);
        let err = client.fetch_posts("myforum", &thread_options("t1")).await.unwrap_err();

        assert!(matches!(err, DisqusError::Status { status: 500, .. }));
        let echo = client.parameters();
        assert_eq!(echo.id, None);
        assert_eq!(echo.shortname, None);
        assert!(echo.debug);
    }

    #[tokio::test]
    async fn non_object_body_is_rejected_and_not_cached() {
        for body in ["null", "\"Invalid API key\"", "[1]"] {
            let (client, calls, _) = client_with_body(body);
            let cache = Arc::new(MemoryCache::default());
            let mut client = client.with_cache(cache.clone());

            let err = client.fetch_posts("myforum", &thread_options("t1")).await.unwrap_err();

            assert!(matches!(err, DisqusError::UnexpectedBody(_)), "body {body}: {err}");
            assert_eq!(calls.load(Ordering::SeqCst), 1);
            assert!(cache.is_empty());
            assert_eq!(client.parameters().id, None);
        }
    }

    struct BrokenCache {
        loads: AtomicUsize,
        saves: AtomicUsize,
    }

    #[async_trait]
    impl ResponseCache for BrokenCache {
        async fn load(&self, _key: &str) -> Result<Option<Value>, DisqusError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Err(DisqusError::Cache("permission denied".to_string()))
        }

        async fn save(&self, _key: &str, _value: &Value) -> Result<(), DisqusError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            Err(DisqusError::Cache("disk full".to_string()))
        }
    }

    #[tokio::test]
    async fn cache_failures_do_not_fail_the_fetch() {
        let (client, calls, _) = client_with_body(r#"{"response":[]}"#);
        let cache = Arc::new(BrokenCache {
            loads: AtomicUsize::new(0),
            saves: AtomicUsize::new(0),
        });
        let mut client = client.with_cache(cache.clone());

        let content = client.fetch_posts("myforum", &thread_options("t1")).await.unwrap();

        assert_eq!(content, json!({ "response": [] }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.loads.load(Ordering::SeqCst), 1);
        assert_eq!(cache.saves.load(Ordering::SeqCst), 1);
        assert_eq!(client.parameters().shortname.as_deref(), Some("myforum"));
    }

    #[test]
    fn redact_masks_api_key_in_logged_url() {
        let (client, _, _) = client_with_body("{}");
        let url = client.build_url("myforum", &ThreadRef::Id("7".to_string()), DEFAULT_ENDPOINT);
        let redacted = client.redact(&url);

        assert!(redacted.ends_with("&forum=myforum&api_key=***"));
        assert!(!redacted.contains("api_key=k"));
    }
}
