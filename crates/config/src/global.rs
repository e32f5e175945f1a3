//! Global configuration settings
//!
//! These settings apply to every map build.

use std::path::PathBuf;

use serde::Deserialize;

/// Global configuration that applies to all maps
///
/// # Example
///
/// ```toml
/// [global]
/// outdir = "/etc/haproxy/maps"
/// ipv6 = false
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GlobalConfig {
    /// Directory maps are written to
    /// Default: current directory
    pub outdir: PathBuf,

    /// Include IPv6 prefixes; `false` loads every source IPv4-only
    /// Default: true
    pub ipv6: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            outdir: PathBuf::from("."),
            ipv6: true,
        }
    }
}

impl GlobalConfig {
    /// Whether sources should leave IPv6 prefixes out
    #[inline]
    pub fn ipv4_only(&self) -> bool {
        !self.ipv6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GlobalConfig::default();
        assert_eq!(config.outdir, PathBuf::from("."));
        assert!(config.ipv6);
        assert!(!config.ipv4_only());
    }

    #[test]
    fn test_deserialize() {
        let config: GlobalConfig = toml::from_str("outdir = \"maps\"\nipv6 = false").unwrap();
        assert_eq!(config.outdir, PathBuf::from("maps"));
        assert!(config.ipv4_only());
    }
}
