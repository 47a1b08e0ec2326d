//! Generated rules and the identifier-keyed collection handed to registrars.

use ahash::AHashMap;
use serde::ser::{Serialize, Serializer};

/// A generated rule fragment.
///
/// Serializes as the attribute set a registrar applies:
/// `{target, content, order, ensure}`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GeneratedRule {
    /// Content-addressed identifier (the resource title)
    #[serde(skip)]
    pub identifier: String,
    /// File the content is appended to
    pub target: String,
    /// Newline-terminated rule line
    pub content: String,
    pub order: i64,
    pub ensure: String,
}

/// Generated rules keyed by identifier, in first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct RuleResources {
    rules: Vec<GeneratedRule>,
    index: AHashMap<String, usize>,
}

impl RuleResources {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule under its identifier.
    ///
    /// A rule with an identifier already present replaces the earlier one in
    /// place. Returns `false` in that case.
    pub fn insert(&mut self, rule: GeneratedRule) -> bool {
        if let Some(&pos) = self.index.get(&rule.identifier) {
            self.rules[pos] = rule;
            return false;
        }
        self.index.insert(rule.identifier.clone(), self.rules.len());
        self.rules.push(rule);
        true
    }

    /// Look up a rule by identifier.
    pub fn get(&self, identifier: &str) -> Option<&GeneratedRule> {
        self.index.get(identifier).map(|&pos| &self.rules[pos])
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.index.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in first-insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, GeneratedRule> {
        self.rules.iter()
    }

    /// Identifiers in first-insertion order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.identifier.as_str())
    }

    /// Move every rule of `other` into this collection.
    pub fn extend(&mut self, other: RuleResources) {
        for rule in other.rules {
            self.insert(rule);
        }
    }
}

impl PartialEq for RuleResources {
    fn eq(&self, other: &Self) -> bool {
        self.rules == other.rules
    }
}

impl Eq for RuleResources {}

impl<'a> IntoIterator for &'a RuleResources {
    type Item = &'a GeneratedRule;
    type IntoIter = std::slice::Iter<'a, GeneratedRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl Serialize for RuleResources {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.rules.iter().map(|r| (&r.identifier, r)))
    }
}
