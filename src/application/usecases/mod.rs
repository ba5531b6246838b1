//! 애플리케이션 유스케이스 모음.

pub mod fetch_posts;
pub mod inspect_config;
