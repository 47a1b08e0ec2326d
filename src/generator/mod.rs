//! Rule generation pipeline.
//!
//! For every address pair of a [`RuleSpec`] the generator instantiates the
//! implicit-matches template, renders the match clauses, composes the rule
//! line and names it after its content. All rules are collected into one
//! [`RuleResources`] and registered in a single call.

mod line;
mod namer;
mod resources;

pub use line::{compose_line, LineBody};
pub use namer::{content_hash, rule_identifier, ORDER_TOKEN};
pub use resources::{GeneratedRule, RuleResources};

use crate::matches::{expand_pair, MatchComposer, MatchFormatter};
use crate::options::merge_target_options;
use crate::params::{RuleParams, RuleSpec};
use crate::registrar::ResourceRegistrar;
use crate::{GeneratorConfig, Result};

/// Expands rule specs into content-addressed rule fragments.
pub struct RuleGenerator<'a> {
    composer: MatchComposer<'a>,
    config: GeneratorConfig,
}

impl<'a> RuleGenerator<'a> {
    /// Create a generator with the default configuration.
    pub fn new(implicit: &'a dyn MatchFormatter, explicit: &'a dyn MatchFormatter) -> Self {
        Self::with_config(implicit, explicit, GeneratorConfig::default())
    }

    /// Create a generator with a custom configuration.
    pub fn with_config(
        implicit: &'a dyn MatchFormatter,
        explicit: &'a dyn MatchFormatter,
        config: GeneratorConfig,
    ) -> Self {
        Self {
            composer: MatchComposer::new(implicit, explicit),
            config,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate one rule per address pair.
    ///
    /// Match clauses are rendered for every pair, raw rule or not, so
    /// formatter errors always abort the run. Pairs producing identical
    /// lines collapse into a single rule since they share an identifier.
    pub fn generate(&self, spec: &RuleSpec) -> Result<RuleResources> {
        let version = spec.ip_version;
        let target = self.config.table_path(version, &spec.table);
        let target_options = merge_target_options(&spec.target_options, version);

        let mut resources = RuleResources::new();

        for pair in &spec.cartesian_product {
            let implicit = expand_pair(&spec.implicit_matches, pair, version);
            let matches = self
                .composer
                .compose(&implicit, &spec.explicit_matches, version)?;

            let body = if spec.has_raw_rule() {
                LineBody::Raw(&spec.rule)
            } else {
                LineBody::Composed {
                    matches: &matches,
                    target_options: &target_options,
                }
            };
            let content = compose_line(&spec.command, &spec.chain, &spec.target, body);

            let identifier = rule_identifier(version, &spec.name, &content);
            log::debug!("{} => {}", identifier, content.trim_end());

            let inserted = resources.insert(GeneratedRule {
                identifier,
                target: target.clone(),
                content,
                order: spec.order,
                ensure: spec.ensure.clone(),
            });
            if !inserted {
                log::debug!(
                    "Address pair ({:?}, {:?}) of {} duplicates an existing rule",
                    pair.source,
                    pair.destination,
                    spec.name
                );
            }
        }

        Ok(resources)
    }

    /// Validate `params`, generate its rules and register them in one batch.
    ///
    /// Nothing is generated or registered when validation fails.
    pub fn add_cartesian_rules(
        &self,
        params: RuleParams,
        registrar: &mut dyn ResourceRegistrar,
    ) -> Result<RuleResources> {
        let spec = params.validate()?;
        let resources = self.generate(&spec)?;

        log::info!(
            "Generated {} IPv{} rules for {} from {} address pairs",
            resources.len(),
            spec.ip_version,
            spec.name,
            spec.cartesian_product.len()
        );

        registrar.register(&self.config.resource_type, &resources)?;
        Ok(resources)
    }
}
