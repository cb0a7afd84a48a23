//! Configuration Loader
//!
//! ## 검색 순서
//!
//! 1. `<working_dir>/alumnet.toml`
//! 2. `<working_dir>/alumnet.json`
//! 3. 명시적으로 추가한 경로 (예: `--config`)
//!
//! 뒤의 파일이 앞의 파일을 오버라이드합니다. 파일이 하나도 없으면 기본값.

use super::types::HostConfig;
use alumnet_foundation::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 기본 설정 파일 이름
pub const CONFIG_FILE_NAMES: [&str; 2] = ["alumnet.toml", "alumnet.json"];

// ============================================================================
// ConfigLoader
// ============================================================================

/// 설정 로더
pub struct ConfigLoader {
    search_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// 작업 디렉토리의 기본 파일들을 검색
    pub fn new(working_dir: &Path) -> Self {
        Self {
            search_paths: CONFIG_FILE_NAMES
                .iter()
                .map(|name| working_dir.join(name))
                .collect(),
        }
    }

    /// 커스텀 검색 경로로 생성
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths: paths,
        }
    }

    /// 가장 높은 우선순위로 경로 추가
    pub fn add_path(&mut self, path: impl Into<PathBuf>) {
        self.search_paths.push(path.into());
    }

    /// 존재하는 파일을 모두 읽어 병합
    ///
    /// 읽을 수 없는 파일은 경고 후 건너뜁니다.
    pub fn load_all(&self) -> HostConfig {
        let mut merged = HostConfig::new();

        for path in &self.search_paths {
            if !path.exists() {
                continue;
            }
            match load_config_from_file(path) {
                Ok(config) => {
                    info!("Loaded settings from: {}", path.display());
                    merged.merge(config);
                }
                Err(e) => {
                    warn!("Failed to load settings from {}: {}", path.display(), e);
                }
            }
        }

        merged
    }

    /// 특정 경로에서만 로드 (없으면 기본값)
    pub fn load_from(&self, path: &Path) -> Result<HostConfig> {
        if path.exists() {
            load_config_from_file(path)
        } else {
            Ok(HostConfig::new())
        }
    }

    /// 존재하는 설정 파일 목록
    pub fn existing_files(&self) -> Vec<PathBuf> {
        self.search_paths
            .iter()
            .filter(|p| p.exists())
            .cloned()
            .collect()
    }
}

// ============================================================================
// 유틸리티 함수
// ============================================================================

/// 파일에서 설정 로드 (확장자로 형식 결정)
pub fn load_config_from_file(path: &Path) -> Result<HostConfig> {
    let content = std::fs::read_to_string(path)?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let parsed = match extension.as_deref() {
        Some("toml") => HostConfig::from_toml_str(&content),
        Some("json") => HostConfig::from_json_str(&content),
        _ => {
            return Err(Error::Config(format!(
                "Unsupported settings format: {} (expected .toml or .json)",
                path.display()
            )))
        }
    };

    let config = parsed.map_err(|e| {
        Error::Config(format!("Invalid settings at {}: {}", path.display(), e))
    })?;

    debug!(
        "Loaded config from {}: {} micro-frontends, {} disabled plugins",
        path.display(),
        config.micro_frontends.len(),
        config.disabled_plugins.len()
    );

    Ok(config)
}
