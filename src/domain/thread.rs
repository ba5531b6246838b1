//! 스레드 식별자 선택 규칙.

use serde::Serialize;

use super::options::NormalizedOptions;
use crate::error::DisqusError;

/// 스레드를 지정하는 세 가지 방식 중 하나.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadRef {
    Identifier(String),
    Link(String),
    Id(String),
}

impl ThreadRef {
    /// identifier > link > id 순으로 먼저 존재하는 값을 선택한다.
    pub fn select(options: &NormalizedOptions) -> Result<Self, DisqusError> {
        if let Some(identifier) = &options.identifier {
            return Ok(Self::Identifier(identifier.clone()));
        }
        if let Some(link) = &options.link {
            return Ok(Self::Link(link.clone()));
        }
        if let Some(id) = &options.id {
            return Ok(Self::Id(id.clone()));
        }

        Err(DisqusError::invalid_input(
            "no thread identifier could be determined (expected `identifier`, `link` or `id`)",
        ))
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Identifier(v) | Self::Link(v) | Self::Id(v) => v,
        }
    }

    /// `thread` 파라미터 뒤에 붙는 쿼리 조각. 값은 이미 인코딩 정책이 적용된 상태여야 한다.
    pub fn query_fragment(&self, encoded_value: &str) -> String {
        match self {
            Self::Identifier(_) => format!(":ident={encoded_value}"),
            Self::Link(_) => format!(":link={encoded_value}"),
            Self::Id(_) => format!("={encoded_value}"),
        }
    }
}
