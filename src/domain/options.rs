//! 요청 옵션 검증/정규화 규칙.

use serde::{Deserialize, Serialize};

use crate::error::DisqusError;

/// Disqus API가 허용하는 최대 limit.
pub const MAX_LIMIT: u32 = 100;

pub const ALLOWED_INCLUDES: [&str; 6] = [
    "unapproved",
    "approved",
    "spam",
    "deleted",
    "flagged",
    "highlighted",
];

/// 호출자가 넘기는 원본 옵션. 모든 필드는 선택값이다.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FetchOptions {
    pub since: Option<String>,
    pub cursor: Option<String>,
    pub query: Option<String>,
    pub include: Option<IncludeInput>,
    pub order: Option<String>,
    pub limit: Option<u32>,
    pub debug: Option<bool>,

    /// 스레드 식별자 (identifier > link > id 우선순위)
    pub identifier: Option<String>,
    pub link: Option<String>,
    pub id: Option<String>,
}

/// include 옵션 입력 형태: 콤마 구분 문자열 또는 문자열 목록.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum IncludeInput {
    Joined(String),
    List(Vec<String>),
}

impl IncludeInput {
    fn members(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            IncludeInput::Joined(value) => value.split(',').collect(),
            IncludeInput::List(values) => values.iter().map(String::as_str).collect(),
        };

        let mut out: Vec<String> = Vec::new();
        for member in raw {
            let member = member.trim().to_string();
            if !out.contains(&member) {
                out.push(member);
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// 정확히 "asc" 또는 "desc"만 허용한다.
    pub fn parse(value: &str) -> Result<Self, DisqusError> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(DisqusError::invalid_input(format!(
                "Unknown `order` value used ({other}), allowed are: asc, desc"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// 검증된 include 집합. wire 포맷은 ", "로 연결된 문자열이다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct IncludeFilter {
    members: Vec<String>,
}

impl IncludeFilter {
    pub fn parse(input: &IncludeInput) -> Result<Self, DisqusError> {
        let members = input.members();
        for member in &members {
            if !ALLOWED_INCLUDES.contains(&member.as_str()) {
                return Err(DisqusError::invalid_input(format!(
                    "Unknown `include` value used ({member}), allowed are: {}",
                    ALLOWED_INCLUDES.join(", ")
                )));
            }
        }
        Ok(Self { members })
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn wire(&self) -> String {
        self.members.join(", ")
    }
}

impl Default for IncludeFilter {
    fn default() -> Self {
        Self {
            members: vec!["approved".to_string()],
        }
    }
}

impl From<IncludeFilter> for String {
    fn from(filter: IncludeFilter) -> Self {
        filter.wire()
    }
}

/// 기본값과 병합된 최종 옵션.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedOptions {
    pub since: Option<String>,
    pub cursor: Option<String>,
    pub query: Option<String>,
    pub include: IncludeFilter,
    pub order: SortOrder,
    pub limit: u32,
    pub debug: bool,
    pub identifier: Option<String>,
    pub link: Option<String>,
    pub id: Option<String>,
}

impl Default for NormalizedOptions {
    fn default() -> Self {
        Self {
            since: None,
            cursor: None,
            query: None,
            include: IncludeFilter::default(),
            order: SortOrder::Desc,
            limit: MAX_LIMIT,
            debug: false,
            identifier: None,
            link: None,
            id: None,
        }
    }
}

impl FetchOptions {
    /// 옵션을 검증하고 기본값 위에 호출자 값을 덮어쓴다.
    pub fn normalize(&self) -> Result<NormalizedOptions, DisqusError> {
        let defaults = NormalizedOptions::default();

        let order = match self.order.as_deref() {
            Some(value) => SortOrder::parse(value)?,
            None => defaults.order,
        };

        let include = match &self.include {
            Some(input) => IncludeFilter::parse(input)?,
            None => defaults.include,
        };

        // 상한 초과는 오류 없이 포화시킨다.
        let limit = self.limit.map_or(defaults.limit, |l| l.min(MAX_LIMIT));

        Ok(NormalizedOptions {
            since: self.since.clone(),
            cursor: self.cursor.clone(),
            query: self.query.clone(),
            include,
            order,
            limit,
            debug: self.debug.unwrap_or(defaults.debug),
            identifier: self.identifier.clone(),
            link: self.link.clone(),
            id: self.id.clone(),
        })
    }
}
