//! 애플리케이션 조립(composition root) 모듈.

use crate::application::usecases::fetch_posts::FetchPostsUseCase;
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::infrastructure::adapters::{HttpClientFactory, JsonConfigRepository};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    client_factory: HttpClientFactory,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self {
            config_repo: JsonConfigRepository,
            client_factory: HttpClientFactory,
        }
    }
}

impl AppComposition {
    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// 코멘트 조회 유스케이스를 생성한다.
    pub fn fetch_posts_usecase(&self) -> FetchPostsUseCase<'_> {
        FetchPostsUseCase {
            config_repo: &self.config_repo,
            client_factory: &self.client_factory,
        }
    }
}
