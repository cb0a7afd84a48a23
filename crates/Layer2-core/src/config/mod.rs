//! # Host Configuration
//!
//! `alumnet.toml` / `alumnet.json` 설정 로딩과 병합.

mod loader;
mod types;

pub use loader::{load_config_from_file, ConfigLoader, CONFIG_FILE_NAMES};
pub use types::{HostConfig, DEFAULT_EVENT_HISTORY, DEFAULT_LOAD_TIMEOUT_MS};
