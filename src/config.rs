//! Generator configuration.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::{IpVersion, Result, RuleGenerator, RuleParams};

/// Default directory holding the per-table rule files.
pub const DEFAULT_TABLES_DIR: &str = "/var/lib/puppet/iptables/tables";

/// Default resource type: append a content fragment to a target file.
pub const DEFAULT_RESOURCE_TYPE: &str = "concat::fragment";

/// Configuration for a [`RuleGenerator`](crate::RuleGenerator).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratorConfig {
    /// Directory the `v<N>_<table>` target files live in
    #[serde(default = "default_tables_dir")]
    pub tables_dir: String,
    /// Resource type name handed to the registrar
    #[serde(default = "default_resource_type")]
    pub resource_type: String,
}

fn default_tables_dir() -> String {
    DEFAULT_TABLES_DIR.to_string()
}

fn default_resource_type() -> String {
    DEFAULT_RESOURCE_TYPE.to_string()
}

impl GeneratorConfig {
    /// Create a new GeneratorConfig.
    pub fn new(tables_dir: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            tables_dir: tables_dir.into(),
            resource_type: resource_type.into(),
        }
    }

    /// Path of the file collecting rules for `table` under `version`.
    pub fn table_path(&self, version: IpVersion, table: &str) -> String {
        format!(
            "{}/v{}_{}",
            self.tables_dir.trim_end_matches('/'),
            version,
            table
        )
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TABLES_DIR, DEFAULT_RESOURCE_TYPE)
    }
}

/// Input document of `iptrule-gen`: an optional config and the rule specs.
///
/// ```yaml
/// config:
///   tables_dir: /etc/firewall
/// rules:
///   - name: ssh
///     ...
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesFile {
    #[serde(default)]
    pub config: GeneratorConfig,
    #[serde(default)]
    pub rules: Vec<RuleParams>,
}

/// Outcome of checking one rule spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSummary {
    pub name: String,
    pub ip_version: IpVersion,
    /// Distinct rules generated
    pub rules: usize,
    /// Address pairs expanded
    pub pairs: usize,
}

impl RulesFile {
    /// Parse a rules document from YAML.
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a rules document from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Validate and generate every rule spec without registering anything.
    ///
    /// Stops at the first invalid spec.
    pub fn check(&self, generator: &RuleGenerator<'_>) -> Result<Vec<RuleSummary>> {
        self.rules
            .iter()
            .map(|params| {
                let spec = params.clone().validate()?;
                let resources = generator.generate(&spec)?;
                Ok(RuleSummary {
                    name: spec.name,
                    ip_version: spec.ip_version,
                    rules: resources.len(),
                    pairs: spec.cartesian_product.len(),
                })
            })
            .collect()
    }
}
