//! Micro-Frontend Manifest - 독립 배포 기능 모듈 메타데이터

use super::route::app_route;
use crate::version::Version;
use alumnet_foundation::{Error, PermissionSet, Result};
use serde::{Deserialize, Serialize};

fn default_version() -> String {
    Version::default().to_string()
}

/// 마이크로 프론트엔드 매니페스트
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroFrontendManifest {
    /// 고유 ID (예: "job-board")
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// 모듈 로더가 해석하는 엔트리 포인트 참조
    pub entry_point: String,

    /// 라우트 경로. 비어 있으면 `/apps/{id}`
    #[serde(default)]
    pub route: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default)]
    pub required_permissions: PermissionSet,

    #[serde(default = "default_version")]
    pub version: String,

    /// 담당 팀
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

impl MicroFrontendManifest {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        entry_point: impl Into<String>,
    ) -> Self {
        let id = id.into();
        Self {
            route: app_route(&id),
            id,
            name: name.into(),
            description: String::new(),
            entry_point: entry_point.into(),
            icon: None,
            required_permissions: PermissionSet::new(),
            version: default_version(),
            team: None,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = route.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn requires(mut self, permission: impl Into<String>) -> Self {
        self.required_permissions.insert(permission);
        self
    }

    /// 등록 전 정규화 + 검증
    ///
    /// 라우트가 비어 있으면 기본 라우트를 채웁니다.
    pub fn normalized(mut self) -> Result<Self> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidRequest("micro-frontend id is empty".into()));
        }
        if self.entry_point.trim().is_empty() {
            return Err(Error::InvalidRequest(format!(
                "micro-frontend '{}' has no entry point",
                self.id
            )));
        }

        if self.route.trim().is_empty() {
            self.route = app_route(&self.id);
        } else if !self.route.starts_with('/') {
            return Err(Error::InvalidRequest(format!(
                "micro-frontend '{}' route '{}' must start with '/'",
                self.id, self.route
            )));
        }

        Version::validate(&format!("micro-frontend '{}'", self.id), &self.version)?;
        self.required_permissions.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_route() {
        let manifest = MicroFrontendManifest::new("job-board", "Job Board", "jobs/main");
        assert_eq!(manifest.route, "/apps/job-board");
        assert_eq!(manifest.version, "1.0.0");
    }

    #[test]
    fn test_json_with_defaults() {
        let json = r#"{
            "id": "admin-panel",
            "name": "Admin Panel",
            "entryPoint": "admin/index",
            "requiredPermissions": ["admin:read"],
            "team": "platform"
        }"#;

        let manifest: MicroFrontendManifest = serde_json::from_str(json).unwrap();
        let manifest = manifest.normalized().unwrap();

        assert_eq!(manifest.route, "/apps/admin-panel");
        assert_eq!(manifest.team.as_deref(), Some("platform"));
        assert!(manifest.icon.is_none());
        assert!(manifest.required_permissions.contains("admin:read"));
    }

    #[test]
    fn test_normalized_rejects_bad_entries() {
        let ok = MicroFrontendManifest::new("a", "A", "a/main");

        assert!(ok.clone().with_route("apps/a").normalized().is_err());
        assert!(ok.clone().with_version("x").normalized().is_err());
        assert!(ok.clone().requires("nocolon").normalized().is_err());
        assert!(MicroFrontendManifest::new("a", "A", " ").normalized().is_err());
        assert!(MicroFrontendManifest::new("", "A", "a").normalized().is_err());
        assert!(ok.normalized().is_ok());
    }
}
