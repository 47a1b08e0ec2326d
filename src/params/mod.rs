//! Rule parameters and their validation.
//!
//! [`RuleParams`] mirrors the raw inputs a caller hands over, with every
//! required parameter optional so its absence can be reported. Validating it
//! yields a [`RuleSpec`], the immutable input of one generation run.

mod scalar;

use serde::Deserialize;

use crate::matches::MatchTemplate;
use crate::options::TargetOptions;
use crate::{Error, IpVersion, Result};

/// A (source, destination) address pair.
///
/// An empty string means the field is omitted and matches any address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "(String, String)")]
pub struct AddressPair {
    pub source: String,
    pub destination: String,
}

impl AddressPair {
    /// Create a new AddressPair.
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Pair that constrains neither source nor destination.
    pub fn any() -> Self {
        Self::default()
    }
}

impl From<(String, String)> for AddressPair {
    fn from((source, destination): (String, String)) -> Self {
        Self {
            source,
            destination,
        }
    }
}

/// Raw, unvalidated rule parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleParams {
    /// Rule set name, part of every identifier
    pub name: String,
    /// Address pairs to expand the rule over
    #[serde(default)]
    pub cartesian_product: Option<Vec<AddressPair>>,
    /// Implicit-matches template (`protocol`, `source_v4`, ...)
    #[serde(default, deserialize_with = "scalar::opt_string_map")]
    pub implicit_matches: Option<MatchTemplate>,
    /// Explicit-matches template (match extensions)
    #[serde(default, deserialize_with = "scalar::string_map")]
    pub explicit_matches: MatchTemplate,
    /// `"4"` or `"6"`
    #[serde(default, deserialize_with = "scalar::opt_string")]
    pub ip_version: Option<String>,
    /// Fragment order within the target file
    #[serde(default)]
    pub order: Option<i64>,
    /// Desired state passed through to the registrar
    #[serde(default, deserialize_with = "scalar::opt_string")]
    pub ensure: Option<String>,
    /// Table name (`filter`, `nat`, ...)
    #[serde(default, deserialize_with = "scalar::opt_string")]
    pub table: Option<String>,
    /// Command prefix of every line (`-A`, `-I`, ...)
    pub command: String,
    /// Chain name
    pub chain: String,
    /// Jump target
    pub target: String,
    /// Target options, keys optionally suffixed with `_v4`/`_v6`
    #[serde(default, deserialize_with = "scalar::string_map")]
    pub target_options: TargetOptions,
    /// Raw rule text replacing match and target-option composition
    #[serde(default, deserialize_with = "scalar::opt_string")]
    pub rule: Option<String>,
}

impl RuleParams {
    /// Check required parameters and build the immutable [`RuleSpec`].
    ///
    /// Fails on the first missing parameter, before any rule is computed.
    pub fn validate(self) -> Result<RuleSpec> {
        let cartesian_product = self
            .cartesian_product
            .ok_or(Error::MissingParameter("cartesian product"))?;
        let implicit_matches = self
            .implicit_matches
            .ok_or(Error::MissingParameter("implicit_matches"))?;
        let ip_version = self
            .ip_version
            .ok_or(Error::MissingParameter("ip_version"))?;
        let order = self.order.ok_or(Error::MissingParameter("order"))?;
        let ensure = self.ensure.ok_or(Error::MissingParameter("ensure"))?;
        let table = self.table.ok_or(Error::MissingParameter("table"))?;

        Ok(RuleSpec {
            name: self.name,
            cartesian_product,
            implicit_matches,
            explicit_matches: self.explicit_matches,
            ip_version: IpVersion::parse(&ip_version)?,
            order,
            ensure,
            table,
            command: self.command,
            chain: self.chain,
            target: self.target,
            target_options: self.target_options,
            rule: self.rule.unwrap_or_default(),
        })
    }
}

/// Validated input of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub name: String,
    pub cartesian_product: Vec<AddressPair>,
    pub implicit_matches: MatchTemplate,
    pub explicit_matches: MatchTemplate,
    pub ip_version: IpVersion,
    pub order: i64,
    pub ensure: String,
    pub table: String,
    pub command: String,
    pub chain: String,
    pub target: String,
    pub target_options: TargetOptions,
    /// Empty when matches and target options should be composed
    pub rule: String,
}

impl RuleSpec {
    /// Whether a raw rule overrides match/target-option composition.
    pub fn has_raw_rule(&self) -> bool {
        !self.rule.is_empty()
    }
}
