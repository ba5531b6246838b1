//! 템플릿 등 후속 처리에 넘겨줄 echo 파라미터.

use serde::Serialize;

use super::thread::ThreadRef;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EchoParameters {
    /// 마지막으로 성공한 fetch의 스레드 식별자
    pub id: Option<ThreadRef>,
    pub shortname: Option<String>,
    pub debug: bool,
    pub api_key: String,
}
