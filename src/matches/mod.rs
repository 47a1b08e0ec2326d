//! Match templates and their rendering to match clauses.
//!
//! A rule's match clauses come from two templates: the implicit matches
//! (addresses, protocol, interfaces) and the explicit matches (match
//! extensions). Both are rendered by a [`MatchFormatter`] injected by the
//! caller; [`ImplicitFlagFormatter`] and [`ExplicitModuleFormatter`] are
//! the defaults used by `iptrule-gen`.

mod explicit;
mod implicit;

pub use explicit::ExplicitModuleFormatter;
pub use implicit::ImplicitFlagFormatter;

use std::collections::BTreeMap;

use crate::params::AddressPair;
use crate::{IpVersion, Result};

/// Mapping of match field to value, ordered by field name.
pub type MatchTemplate = BTreeMap<String, String>;

/// Renders a match template to match clause text.
///
/// Implementations must be deterministic and return an empty string for an
/// empty template.
pub trait MatchFormatter {
    /// Render `template` for IPv6 (`is_ipv6`) or IPv4 rules.
    fn format(&self, template: &MatchTemplate, is_ipv6: bool) -> Result<String>;
}

impl<F> MatchFormatter for F
where
    F: Fn(&MatchTemplate, bool) -> Result<String>,
{
    fn format(&self, template: &MatchTemplate, is_ipv6: bool) -> Result<String> {
        self(template, is_ipv6)
    }
}

/// Instantiate the implicit-matches template for one address pair.
///
/// Returns a private copy of `template` with `source_v<N>` and
/// `destination_v<N>` set for each non-empty side of the pair.
pub fn expand_pair(
    template: &MatchTemplate,
    pair: &AddressPair,
    version: IpVersion,
) -> MatchTemplate {
    let mut instance = template.clone();

    if !pair.source.is_empty() {
        instance.insert(format!("source_v{}", version), pair.source.clone());
    }

    if !pair.destination.is_empty() {
        instance.insert(format!("destination_v{}", version), pair.destination.clone());
    }

    instance
}

/// Rendered implicit and explicit match clauses of one rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComposedMatches {
    pub implicit: String,
    pub explicit: String,
}

/// Renders both match templates through the injected formatters.
pub struct MatchComposer<'a> {
    implicit: &'a dyn MatchFormatter,
    explicit: &'a dyn MatchFormatter,
}

impl<'a> MatchComposer<'a> {
    /// Create a new MatchComposer.
    pub fn new(implicit: &'a dyn MatchFormatter, explicit: &'a dyn MatchFormatter) -> Self {
        Self { implicit, explicit }
    }

    /// Render an instantiated implicit template and the explicit template.
    pub fn compose(
        &self,
        implicit: &MatchTemplate,
        explicit: &MatchTemplate,
        version: IpVersion,
    ) -> Result<ComposedMatches> {
        Ok(ComposedMatches {
            implicit: self.implicit.format(implicit, version.is_v6())?,
            explicit: self.explicit.format(explicit, version.is_v6())?,
        })
    }
}
