//! iptrule - Deterministic iptables rule generation.
//!
//! This crate expands a rule template over a cartesian product of
//! (source, destination) address pairs and produces one iptables rule line
//! per pair, each named by a content-derived identifier. The resulting set is
//! handed to a resource registrar in one batch for idempotent application.
//!
//! # Features
//!
//! - **Cartesian expansion**: one rule per address pair, empty sides omitted
//! - **Version-aware target options**: `_v4`/`_v6` suffixed overrides
//! - **Content-addressed identifiers**: identical rules collapse by name
//! - **Pluggable collaborators**: match formatters and registrars are traits
//!
//! # Quick Start
//!
//! ```ignore
//! use iptrule::{
//!     AddressPair, ExplicitModuleFormatter, ImplicitFlagFormatter, MemoryRegistrar,
//!     RuleGenerator, RuleParams,
//! };
//!
//! let implicit = ImplicitFlagFormatter::new();
//! let explicit = ExplicitModuleFormatter::new();
//! let generator = RuleGenerator::new(&implicit, &explicit);
//!
//! let params = RuleParams {
//!     name: "ssh".into(),
//!     cartesian_product: Some(vec![AddressPair::new("10.0.0.0/8", "")]),
//!     implicit_matches: Some([("protocol".into(), "tcp".into())].into()),
//!     ip_version: Some("4".into()),
//!     order: Some(100),
//!     ensure: Some("present".into()),
//!     table: Some("filter".into()),
//!     command: "-A".into(),
//!     chain: "INPUT".into(),
//!     target: "ACCEPT".into(),
//!     ..Default::default()
//! };
//!
//! let mut registrar = MemoryRegistrar::new();
//! let rules = generator.add_cartesian_rules(params, &mut registrar)?;
//! // "-A INPUT -s 10.0.0.0/8 -p tcp -j ACCEPT\n"
//! ```
//!
//! # Identifiers
//!
//! Every rule is named `iptables_rule_v<N>_<name>-20-<sha1>`, where the hash
//! covers the exact rule line including its trailing newline.

mod config;
mod error;
mod ip_version;

pub mod generator;
pub mod matches;
pub mod options;
pub mod params;
pub mod registrar;

// Re-export core types
pub use config::{
    GeneratorConfig, RuleSummary, RulesFile, DEFAULT_RESOURCE_TYPE, DEFAULT_TABLES_DIR,
};
pub use error::{Error, Result};
pub use ip_version::IpVersion;

// Re-export pipeline types
pub use generator::{GeneratedRule, RuleGenerator, RuleResources};
pub use matches::{
    ExplicitModuleFormatter, ImplicitFlagFormatter, MatchFormatter, MatchTemplate,
};
pub use options::{merge_target_options, OptionEntry, TargetOptions};
pub use params::{AddressPair, RuleParams, RuleSpec};
pub use registrar::{JsonRegistrar, MemoryRegistrar, ResourceRegistrar};
