//! IP version of a generated rule set.

use std::fmt;

use crate::{Error, Result};

/// IP version a rule is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpVersion {
    /// IPv4 (iptables)
    V4,
    /// IPv6 (ip6tables)
    V6,
}

impl IpVersion {
    /// Parse an IP version. Only the exact strings `4` and `6` are valid.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "4" => Ok(IpVersion::V4),
            "6" => Ok(IpVersion::V6),
            _ => Err(Error::InvalidIpVersion(s.to_string())),
        }
    }

    /// Get the canonical string representation (`"4"` or `"6"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            IpVersion::V4 => "4",
            IpVersion::V6 => "6",
        }
    }

    /// The other version of {4, 6}.
    pub fn inactive(&self) -> Self {
        match self {
            IpVersion::V4 => IpVersion::V6,
            IpVersion::V6 => IpVersion::V4,
        }
    }

    /// Key suffix tagging a value as specific to this version.
    pub fn suffix(&self) -> &'static str {
        match self {
            IpVersion::V4 => "_v4",
            IpVersion::V6 => "_v6",
        }
    }

    pub fn is_v6(&self) -> bool {
        matches!(self, IpVersion::V6)
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for IpVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        IpVersion::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_version_parse() {
        assert_eq!(IpVersion::parse("4").unwrap(), IpVersion::V4);
        assert_eq!(IpVersion::parse("6").unwrap(), IpVersion::V6);
        assert!(matches!(
            IpVersion::parse("5"),
            Err(Error::InvalidIpVersion(v)) if v == "5"
        ));
        assert!(IpVersion::parse("").is_err());
    }

    #[test]
    fn test_ip_version_parse_is_exact() {
        for input in ["v4", "IPv4", " 4", "4 ", "ipv6", "V6", "06"] {
            assert!(
                matches!(IpVersion::parse(input), Err(Error::InvalidIpVersion(_))),
                "{:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_inactive_is_the_other_version() {
        assert_eq!(IpVersion::V4.inactive(), IpVersion::V6);
        assert_eq!(IpVersion::V6.inactive(), IpVersion::V4);
    }

    #[test]
    fn test_suffix_and_display() {
        assert_eq!(IpVersion::V4.suffix(), "_v4");
        assert_eq!(IpVersion::V6.suffix(), "_v6");
        assert_eq!(IpVersion::V4.to_string(), "4");
        assert!(IpVersion::V6.is_v6());
        assert!(!IpVersion::V4.is_v6());
    }
}
