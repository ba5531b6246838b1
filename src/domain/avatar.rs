//! 기본 아바타 URL 정규화.
//!
//! 아바타가 없는 작성자는 gravatar 기본 URL(http 전용)로 내려오고,
//! 아바타가 있는 작성자는 항상 mediacdn URL로 내려온다.
//! https 치환을 일관되게 하려면 앞의 경우를 mediacdn 기본 이미지로 고정해야 한다.

use serde_json::Value;

pub const DEFAULT_GRAVATAR_PREFIX: &str = "http://www.gravatar.com/avatar.php";
pub const DEFAULT_AVATAR_URL: &str = "http://mediacdn.disqus.com/1341862960/images/noavatar92.png";

/// `response[*].author.avatar.cache`의 gravatar 기본 URL을 치환한다.
/// 치환한 항목 수를 반환한다.
pub fn normalize_default_avatars(content: &mut Value) -> usize {
    let Some(posts) = content.get_mut("response").and_then(Value::as_array_mut) else {
        return 0;
    };

    let mut rewritten = 0;
    for post in posts {
        let Some(cache) = post.pointer_mut("/author/avatar/cache") else {
            continue;
        };
        let is_default = cache
            .as_str()
            .is_some_and(|url| url.starts_with(DEFAULT_GRAVATAR_PREFIX));
        if is_default {
            *cache = Value::String(DEFAULT_AVATAR_URL.to_string());
            rewritten += 1;
        }
    }
    rewritten
}
