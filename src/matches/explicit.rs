//! Default explicit-match formatter.

use super::{MatchFormatter, MatchTemplate};
use crate::options::resolve_options;
use crate::{IpVersion, Result};

/// Renders explicit matches as match extensions.
///
/// Each entry `module: args` becomes `-m <module> <args>`. Module names
/// follow the same `_v4`/`_v6` override rules as target options, so
/// `icmp_v6: "--icmpv6-type echo-request"` only applies to IPv6 rules and
/// replaces a generic `icmp` entry there.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitModuleFormatter;

impl ExplicitModuleFormatter {
    /// Create a new formatter.
    pub fn new() -> Self {
        Self
    }
}

impl MatchFormatter for ExplicitModuleFormatter {
    fn format(&self, template: &MatchTemplate, is_ipv6: bool) -> Result<String> {
        let version = if is_ipv6 { IpVersion::V6 } else { IpVersion::V4 };

        let clauses: Vec<String> = resolve_options(template, version)
            .into_iter()
            .map(|entry| {
                let args = entry.value.trim();
                if args.is_empty() {
                    format!("-m {}", entry.key)
                } else {
                    format!("-m {} {}", entry.key, args)
                }
            })
            .collect();

        Ok(clauses.join(" "))
    }
}
