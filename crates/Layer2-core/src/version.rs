//! Version - 매니페스트 버전 문자열 파싱

use alumnet_foundation::{Error, Result};
use serde::{Deserialize, Serialize};

/// 시맨틱 버전 (major.minor.patch, pre-release/build 접미사 허용)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// 버전 문자열 파싱 (예: "1.2.3", "2.0.0-beta.1")
    pub fn parse(s: &str) -> Option<Self> {
        let core = s.split(['-', '+']).next()?;
        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return None;
        }

        Some(Self {
            major: parts[0].parse().ok()?,
            minor: parts[1].parse().ok()?,
            patch: parts[2].parse().ok()?,
        })
    }

    /// 파싱 실패 시 `InvalidRequest`
    pub fn validate(subject: &str, s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| {
            Error::InvalidRequest(format!(
                "{} has invalid version '{}', expected major.minor.patch",
                subject, s
            ))
        })
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = Version::parse("1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));

        let v = Version::parse("2.0.0-beta.1").unwrap();
        assert_eq!(v, Version::new(2, 0, 0));

        assert!(Version::parse("1.2").is_none());
        assert!(Version::parse("one.two.three").is_none());
        assert!(Version::parse("").is_none());
    }

    #[test]
    fn test_version_ordering() {
        let v1 = Version::new(1, 0, 0);
        let v2 = Version::new(1, 4, 2);
        let v3 = Version::new(2, 0, 0);

        assert!(v1 < v2 && v2 < v3);
    }

    #[test]
    fn test_validate_error() {
        let err = Version::validate("plugin 'x'", "latest").unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
        assert!(err.to_string().contains("latest"));
    }
}
