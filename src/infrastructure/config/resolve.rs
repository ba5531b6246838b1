//! 설정 값(api key/env 등)을 실제 런타임 값으로 해석하는 유틸리티.
//!
//! - 환경변수/OS 디렉터리 접근은 인프라 계층에서만 수행한다.

use std::env;
use std::path::PathBuf;

use crate::application::config::{Config, DEFAULT_API_KEY_ENV};

/// API key 해석 결과. `source`는 진단 출력용 라벨이다.
#[derive(Debug, Clone, Default)]
pub struct ApiKeyResolution {
    pub key: Option<String>,
    pub source: Option<String>,
}

/// 포럼 설정 -> 전역 설정 -> 기본 환경변수 순으로 API key를 찾는다.
pub fn resolve_api_key(config: &Config, shortname: &str) -> ApiKeyResolution {
    let forum = config.forum(shortname);
    let candidates = [
        (
            forum.and_then(|f| f.api_key.as_deref()),
            forum.and_then(|f| f.api_key_env.as_deref()),
        ),
        (
            config.defaults.api_key.as_deref(),
            config.defaults.api_key_env.as_deref(),
        ),
    ];

    let mut hint: Option<String> = None;
    for (inline, env_name) in candidates {
        if let Some(key) = inline.map(str::trim).filter(|v| !v.is_empty()) {
            return ApiKeyResolution {
                key: Some(key.to_string()),
                source: Some("inline".to_string()),
            };
        }
        if let Some(env_name) = env_name.map(str::trim).filter(|v| !v.is_empty()) {
            match read_env(env_name) {
                Some(key) => {
                    return ApiKeyResolution {
                        key: Some(key),
                        source: Some(format!("env:{env_name}")),
                    };
                }
                None => {
                    hint.get_or_insert_with(|| format!("env:{env_name} (missing)"));
                }
            }
        }
    }

    if let Some(key) = read_env(DEFAULT_API_KEY_ENV) {
        return ApiKeyResolution {
            key: Some(key),
            source: Some(format!("env:{DEFAULT_API_KEY_ENV}")),
        };
    }

    ApiKeyResolution {
        key: None,
        source: hint,
    }
}

pub fn default_cache_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("disqus-relay")
}

fn read_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
