//! 병합된 설정과 API key 출처를 점검하는 유스케이스.

use anyhow::{Context, Result};

use crate::application::ports::ConfigRepository;

pub struct InspectConfigUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
}

impl<'a> InspectConfigUseCase<'a> {
    /// 탐색 경로, 로딩된 파일, 포럼별 캐시 namespace를 JSON 문자열로 반환한다.
    pub fn execute(&self) -> Result<String> {
        self.config_repo
            .inspect_pretty_json()
            .context("failed to inspect disqus-relay config")
    }
}
