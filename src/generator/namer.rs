//! Content-addressed rule identifiers.

use sha1::{Digest, Sha1};

use crate::IpVersion;

/// Fixed namespacing token between the rule name and the content hash.
pub const ORDER_TOKEN: &str = "20";

/// Hex-encoded SHA-1 of a composed rule line.
pub fn content_hash(line: &str) -> String {
    format!("{:x}", Sha1::digest(line.as_bytes()))
}

/// Identifier of a rule line: `iptables_rule_v<N>_<name>-20-<sha1>`.
///
/// Identical lines of the same rule set always map to the same identifier.
pub fn rule_identifier(version: IpVersion, name: &str, line: &str) -> String {
    format!(
        "iptables_rule_v{}_{}-{}-{}",
        version,
        name,
        ORDER_TOKEN,
        content_hash(line)
    )
}
