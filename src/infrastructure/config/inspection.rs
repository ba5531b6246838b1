//! 적용 설정 진단(inspection) 뷰 모델.
//! API key 값 자체는 노출하지 않고 출처만 보여준다.

use std::collections::BTreeMap;

use serde::Serialize;

use super::cache_root;
use super::loader::LoadedConfig;
use super::resolve::resolve_api_key;
use crate::application::client::UrlEncoding;

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub effective_defaults: EffectiveDefaults,
    pub forums: BTreeMap<String, ForumInspection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveDefaults {
    pub api_base: String,
    pub debug: bool,
    pub timeout_ms: u64,
    pub url_encoding: UrlEncoding,
    pub cache_dir: String,
    pub api_key_source: Option<String>,
    pub api_key_resolved: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForumInspection {
    pub cache_namespace: Option<String>,
    pub debug: bool,
    pub api_key_source: Option<String>,
    pub api_key_resolved: bool,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;

        let mut forums = BTreeMap::new();
        for shortname in config.forums.keys() {
            let key = resolve_api_key(config, shortname);
            forums.insert(
                shortname.clone(),
                ForumInspection {
                    cache_namespace: config.cache_namespace(shortname).map(str::to_string),
                    debug: config.debug_for(shortname),
                    api_key_source: key.source,
                    api_key_resolved: key.key.is_some(),
                },
            );
        }

        // 포럼 설정이 없는 shortname 기준의 기본 해석 결과.
        let default_key = resolve_api_key(config, "");

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            effective_defaults: EffectiveDefaults {
                api_base: config.api_base().to_string(),
                debug: config.defaults.debug.unwrap_or(false),
                timeout_ms: config.timeout_ms(),
                url_encoding: config.url_encoding(),
                cache_dir: cache_root(config).display().to_string(),
                api_key_source: default_key.source,
                api_key_resolved: default_key.key.is_some(),
            },
            forums,
        }
    }
}
