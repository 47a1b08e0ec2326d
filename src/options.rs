//! Target option resolution.
//!
//! Target options may carry an IP-version suffix (`_v4`/`_v6`). For a rule
//! of a given version:
//! - options tagged with the other version are dropped,
//! - a generic option is dropped when a same-named option tagged with the
//!   active version exists,
//! - options tagged with the active version lose their suffix.
//!
//! The suffix test is a plain trailing 3-character comparison, so a key such
//! as `queue_v4` is always treated as version-tagged whatever it means.

use std::collections::BTreeMap;

use crate::IpVersion;

/// Target option name to value, ordered by name.
pub type TargetOptions = BTreeMap<String, String>;

/// A single option split into its base key and version tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    /// Key without the version suffix
    pub key: String,
    /// Version named by the key suffix, if any
    pub version: Option<IpVersion>,
    pub value: String,
}

impl OptionEntry {
    /// Split `key` into base key and version suffix.
    pub fn parse(key: &str, value: &str) -> Self {
        let (key, version) = [IpVersion::V4, IpVersion::V6]
            .into_iter()
            .find_map(|v| key.strip_suffix(v.suffix()).map(|base| (base, Some(v))))
            .unwrap_or((key, None));

        Self {
            key: key.to_string(),
            version,
            value: value.to_string(),
        }
    }

    /// Render as a target option flag, e.g. `--log-prefix "ssh: " `.
    pub fn to_flag(&self) -> String {
        format!("--{} \"{}\" ", self.key, self.value)
    }
}

/// Resolve version overrides, in key order.
///
/// Every returned entry applies to `version`; at most one entry is returned
/// per logical option name.
pub fn resolve_options(options: &TargetOptions, version: IpVersion) -> Vec<OptionEntry> {
    let inactive = version.inactive();

    options
        .iter()
        .filter_map(|(key, value)| {
            let entry = OptionEntry::parse(key, value);

            if entry.version == Some(inactive) {
                return None;
            }

            let override_key = format!("{}{}", key, version.suffix());
            if options.contains_key(&override_key) {
                return None;
            }

            Some(entry)
        })
        .collect()
}

/// Merge target options into the option string of a `version` rule.
///
/// Each emitted option renders as `--<key> "<value>" `, trailing space
/// included; no options yields an empty string.
pub fn merge_target_options(options: &TargetOptions, version: IpVersion) -> String {
    resolve_options(options, version)
        .iter()
        .map(OptionEntry::to_flag)
        .collect()
}
