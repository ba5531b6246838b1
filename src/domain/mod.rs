//! Domain layer
//! 옵션 검증, 스레드 식별자 선택, 응답 정규화 규칙을 외부 의존성 없이 표현한다.

pub mod avatar;
pub mod echo;
pub mod options;
pub mod thread;
