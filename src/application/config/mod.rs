//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::application::client::{DEFAULT_API_BASE, UrlEncoding};

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_API_KEY_ENV: &str = "DISQUS_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// 포럼(shortname)별 설정
    #[serde(default)]
    pub forums: HashMap<String, ForumConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// API key 직접값(민감정보: 권장하지 않음)
    pub api_key: Option<String>,
    /// API key를 읽을 환경변수 이름(기본 DISQUS_API_KEY)
    pub api_key_env: Option<String>,
    /// API base URL override
    pub api_base: Option<String>,
    /// echo 파라미터에 실리는 debug 플래그
    pub debug: Option<bool>,
    /// HTTP 요청 타임아웃(ms)
    pub timeout_ms: Option<u64>,
    /// URL 값 인코딩 정책(raw/percent)
    pub url_encoding: Option<UrlEncoding>,
    /// 파일 캐시 루트 디렉터리
    pub cache_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ForumConfig {
    /// 응답 캐시 namespace. 없으면 캐시를 사용하지 않는다.
    pub cache: Option<String>,
    pub api_key: Option<String>,
    pub api_key_env: Option<String>,
    pub debug: Option<bool>,
}

impl Config {
    pub fn api_base(&self) -> &str {
        self.defaults
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
    }

    pub fn timeout_ms(&self) -> u64 {
        self.defaults.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)
    }

    pub fn url_encoding(&self) -> UrlEncoding {
        self.defaults.url_encoding.unwrap_or_default()
    }

    pub fn forum(&self, shortname: &str) -> Option<&ForumConfig> {
        self.forums.get(shortname)
    }

    /// 포럼 설정이 전역 기본값보다 우선한다.
    pub fn debug_for(&self, shortname: &str) -> bool {
        self.forum(shortname)
            .and_then(|f| f.debug)
            .or(self.defaults.debug)
            .unwrap_or(false)
    }

    pub fn cache_namespace(&self, shortname: &str) -> Option<&str> {
        self.forum(shortname)
            .and_then(|f| f.cache.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);

        for (shortname, incoming) in other.forums {
            if let Some(existing) = self.forums.get_mut(&shortname) {
                existing.merge_from(incoming);
            } else {
                self.forums.insert(shortname, incoming);
            }
        }
    }
}

impl DefaultsConfig {
    pub fn merge_from(&mut self, other: DefaultsConfig) {
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.api_key_env.is_some() {
            self.api_key_env = other.api_key_env;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
        if other.debug.is_some() {
            self.debug = other.debug;
        }
        if other.timeout_ms.is_some() {
            self.timeout_ms = other.timeout_ms;
        }
        if other.url_encoding.is_some() {
            self.url_encoding = other.url_encoding;
        }
        if other.cache_dir.is_some() {
            self.cache_dir = other.cache_dir;
        }
    }
}

impl ForumConfig {
    pub fn merge_from(&mut self, other: ForumConfig) {
        if other.cache.is_some() {
            self.cache = other.cache;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.api_key_env.is_some() {
            self.api_key_env = other.api_key_env;
        }
        if other.debug.is_some() {
            self.debug = other.debug;
        }
    }
}
