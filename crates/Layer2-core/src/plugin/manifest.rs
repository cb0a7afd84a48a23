//! Plugin Manifest - 플러그인 메타데이터 정의

use crate::extension::HOST_OWNER;
use crate::version::Version;
use alumnet_foundation::{Error, PermissionSet, Result};
use serde::{Deserialize, Serialize};

/// 플러그인 매니페스트
///
/// 설치/활성화 상태는 레지스트리가 관리하며 매니페스트에는 없습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginManifest {
    /// 고유 플러그인 ID (예: "mentor.match")
    pub id: String,

    /// 표시 이름
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// 시맨틱 버전 문자열
    pub version: String,

    #[serde(default)]
    pub author: String,

    /// 플러그인이 필요로 하는 권한
    #[serde(default)]
    pub required_permissions: PermissionSet,
}

impl PluginManifest {
    /// 새 매니페스트 생성 (버전 1.0.0)
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            version: Version::default().to_string(),
            author: String::new(),
            required_permissions: PermissionSet::new(),
        }
    }

    /// 빌더 패턴: 버전 설정
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// 빌더 패턴: 설명 설정
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// 빌더 패턴: 작성자 설정
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// 빌더 패턴: 요구 권한 추가
    pub fn requires(mut self, permission: impl Into<String>) -> Self {
        self.required_permissions.insert(permission);
        self
    }

    /// 설치 전 검증: ID, 버전, 권한 토큰 형식
    ///
    /// 호스트 소유자 ID(`HOST_OWNER`)는 플러그인 ID로 쓸 수 없습니다.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidRequest("plugin id is empty".into()));
        }
        if self.id.trim() == HOST_OWNER {
            return Err(Error::InvalidRequest(format!(
                "plugin id '{}' is reserved for the host",
                HOST_OWNER
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::InvalidRequest(format!(
                "plugin '{}' has no name",
                self.id
            )));
        }
        Version::validate(&format!("plugin '{}'", self.id), &self.version)?;
        self.required_permissions.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_builder() {
        let manifest = PluginManifest::new("mentor.match", "Mentor Match")
            .with_version("1.2.0")
            .with_description("Suggests mentors")
            .with_author("Career Services")
            .requires("mentorship:request");

        assert_eq!(manifest.id, "mentor.match");
        assert_eq!(manifest.version, "1.2.0");
        assert!(manifest.required_permissions.contains("mentorship:request"));
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_manifest_validation() {
        assert!(PluginManifest::new("", "x").validate().is_err());
        assert!(PluginManifest::new("p", " ").validate().is_err());
        assert!(PluginManifest::new("p", "P")
            .with_version("next")
            .validate()
            .is_err());
        assert!(PluginManifest::new("p", "P")
            .requires("admin")
            .validate()
            .is_err());
    }

    #[test]
    fn test_host_owner_id_is_reserved() {
        let err = PluginManifest::new("host", "Impostor").validate().unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
        assert!(PluginManifest::new("host.tools", "Host Tools").validate().is_ok());
    }

    #[test]
    fn test_manifest_json() {
        let json = r#"{
            "id": "stories.digest",
            "name": "Stories Digest",
            "version": "0.3.1",
            "requiredPermissions": ["stories:read"]
        }"#;

        let manifest: PluginManifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.id, "stories.digest");
        assert!(manifest.author.is_empty());
        assert!(manifest.required_permissions.contains("stories:read"));
    }
}
