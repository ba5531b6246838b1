//! 응답 캐시 구현체.
//! 메모리 캐시는 프로세스 수명 동안, 파일 캐시는 namespace 디렉터리 단위로 값을 보관한다.

mod file;
mod memory;

pub use file::FileCache;
pub use memory::MemoryCache;
