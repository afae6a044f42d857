//! Deployment platform enumeration.

use serde::{Deserialize, Serialize};

/// Target platform a slice is deployed onto.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Local Linux cluster (default)
    #[default]
    Linux,

    /// OpenStack deployment
    Openstack,

    /// AWS deployment
    Aws,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Openstack => "openstack",
            Self::Aws => "aws",
        }
    }

    /// All known platforms, for help text and listings.
    pub fn all() -> &'static [Platform] {
        &[Self::Linux, Self::Openstack, Self::Aws]
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(Self::Linux),
            "openstack" => Ok(Self::Openstack),
            "aws" => Ok(Self::Aws),
            other => Err(format!("unknown platform: {other} (expected linux, openstack or aws)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for p in Platform::all() {
            assert_eq!(p.as_str().parse::<Platform>().unwrap(), *p);
        }
        assert!("gcp".parse::<Platform>().is_err());
    }

    #[test]
    fn test_default_is_linux() {
        assert_eq!(Platform::default(), Platform::Linux);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Platform::Openstack).unwrap(), "\"openstack\"");
        let p: Platform = serde_json::from_str("\"aws\"").unwrap();
        assert_eq!(p, Platform::Aws);
    }
}
