//! disqus-relay library root.
//! Disqus 3.0 API 클라이언트와 캐시/설정 계층을 외부에 노출한다.

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interface;

pub use application::client::{DEFAULT_API_BASE, DEFAULT_ENDPOINT, DisqusClient, UrlEncoding};
pub use application::ports::{HttpTransport, ResponseCache};
pub use domain::echo::EchoParameters;
pub use domain::options::{FetchOptions, IncludeInput};
pub use domain::thread::ThreadRef;
pub use error::DisqusError;

use application::usecases::fetch_posts::{FetchPostsOutput, FetchPostsRequest};
use interface::cli::AppComposition;

/// 라이브러리 직접 호출용 실행 함수. 병합 설정으로 클라이언트를 조립해 조회한다.
pub async fn fetch(request: FetchPostsRequest) -> Result<FetchPostsOutput> {
    let composition = AppComposition::default();
    composition.fetch_posts_usecase().execute(request).await
}

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json() -> Result<String> {
    let composition = AppComposition::default();
    composition.inspect_config_usecase().execute()
}
