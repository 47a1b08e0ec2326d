//! Default implicit-match formatter.

use super::{MatchFormatter, MatchTemplate};
use crate::{Error, IpVersion, Result};

/// Implicit match fields in emission order: (field, flag, version-suffixed).
const FIELDS: &[(&str, &str, bool)] = &[
    ("source", "-s", true),
    ("destination", "-d", true),
    ("protocol", "-p", false),
    ("incoming_interface", "-i", false),
    ("outgoing_interface", "-o", false),
];

const FRAGMENT: &str = "fragment";

/// Renders implicit matches as iptables flags.
///
/// | field                          | flag |
/// |--------------------------------|------|
/// | `source_v4` / `source_v6`      | `-s` |
/// | `destination_v4` / `_v6`       | `-d` |
/// | `protocol`                     | `-p` |
/// | `incoming_interface`           | `-i` |
/// | `outgoing_interface`           | `-o` |
/// | `fragment` (`true`/`false`)    | `-f` |
///
/// A value starting with `!` negates the clause. Address fields of the other
/// IP version are ignored, as is `fragment` for IPv6.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImplicitFlagFormatter;

impl ImplicitFlagFormatter {
    /// Create a new formatter.
    pub fn new() -> Self {
        Self
    }
}

fn is_known_field(key: &str) -> bool {
    key == FRAGMENT
        || FIELDS.iter().any(|(field, _, versioned)| {
            if *versioned {
                [IpVersion::V4, IpVersion::V6]
                    .iter()
                    .any(|v| key.strip_suffix(v.suffix()) == Some(*field))
            } else {
                key == *field
            }
        })
}

/// `-s 10.0.0.1`, or `! -s 10.0.0.1` for a `!`-prefixed value.
fn clause(flag: &str, value: &str) -> Option<String> {
    let value = value.trim();
    if let Some(negated) = value.strip_prefix('!') {
        let negated = negated.trim();
        if negated.is_empty() {
            return None;
        }
        return Some(format!("! {} {}", flag, negated));
    }
    if value.is_empty() {
        return None;
    }
    Some(format!("{} {}", flag, value))
}

fn fragment_clause(value: &str) -> Result<Option<&'static str>> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" => Ok(Some("-f")),
        "!true" | "!yes" | "!" => Ok(Some("! -f")),
        "false" | "no" | "" => Ok(None),
        other => Err(Error::formatter(
            "implicit",
            format!("invalid fragment value: {}", other),
        )),
    }
}

impl MatchFormatter for ImplicitFlagFormatter {
    fn format(&self, template: &MatchTemplate, is_ipv6: bool) -> Result<String> {
        if let Some(key) = template.keys().find(|k| !is_known_field(k)) {
            return Err(Error::formatter("implicit", format!("unknown field: {}", key)));
        }

        let version = if is_ipv6 { IpVersion::V6 } else { IpVersion::V4 };
        let mut clauses = Vec::new();

        for (field, flag, versioned) in FIELDS {
            let key = if *versioned {
                format!("{}{}", field, version.suffix())
            } else {
                field.to_string()
            };
            if let Some(clause) = template.get(&key).and_then(|v| clause(flag, v)) {
                clauses.push(clause);
            }
        }

        if let Some(value) = template.get(FRAGMENT) {
            let fragment = fragment_clause(value)?;
            if is_ipv6 {
                if fragment.is_some() {
                    log::debug!("ignoring fragment match for IPv6 rule");
                }
            } else if let Some(fragment) = fragment {
                clauses.push(fragment.to_string());
            }
        }

        Ok(clauses.join(" "))
    }
}
