//! # Host
//!
//! 레지스트리, 서비스 퍼사드, 로더를 한 세션으로 묶습니다.
//!
//! ```text
//! HostBuilder::build()  ── 서비스 퍼사드 1회 생성, 카탈로그 등록, 플러그인 설치
//!        │
//! Host::start()         ── 시작 플러그인 활성화, RegistrationHandle 발급
//!        │                  (설정 시 global 슬롯에 게시)
//! Host::shutdown()      ── 플러그인 비활성화, 핸들 무효화, 슬롯 비움
//! ```

mod builder;
pub mod global;
mod handle;
mod lifecycle;
mod shell;

pub use builder::HostBuilder;
pub use handle::RegistrationHandle;
pub use lifecycle::Host;
pub use shell::ShellSnapshot;
