//! Resource registrars.
//!
//! A registrar receives the whole generated rule set in one call and turns it
//! into managed state. Registration atomicity is the registrar's concern;
//! errors are returned to the caller untouched.

mod json;

pub use json::JsonRegistrar;

use crate::generator::RuleResources;
use crate::Result;

/// Receives generated rule sets.
pub trait ResourceRegistrar {
    /// Register every rule of `resources` under `resource_type`.
    fn register(&mut self, resource_type: &str, resources: &RuleResources) -> Result<()>;
}

impl<F> ResourceRegistrar for F
where
    F: FnMut(&str, &RuleResources) -> Result<()>,
{
    fn register(&mut self, resource_type: &str, resources: &RuleResources) -> Result<()> {
        self(resource_type, resources)
    }
}

/// A batch received by a [`MemoryRegistrar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredBatch {
    pub resource_type: String,
    pub resources: RuleResources,
}

/// Registrar that keeps every batch in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistrar {
    batches: Vec<RegisteredBatch>,
}

impl MemoryRegistrar {
    /// Create an empty registrar.
    pub fn new() -> Self {
        Self::default()
    }

    /// All batches, in registration order.
    pub fn batches(&self) -> &[RegisteredBatch] {
        &self.batches
    }

    /// Number of `register` calls received.
    pub fn calls(&self) -> usize {
        self.batches.len()
    }

    /// Most recent batch.
    pub fn last(&self) -> Option<&RegisteredBatch> {
        self.batches.last()
    }
}

impl ResourceRegistrar for MemoryRegistrar {
    fn register(&mut self, resource_type: &str, resources: &RuleResources) -> Result<()> {
        log::debug!(
            "Recorded {} {} resources in memory",
            resources.len(),
            resource_type
        );
        self.batches.push(RegisteredBatch {
            resource_type: resource_type.to_string(),
            resources: resources.clone(),
        });
        Ok(())
    }
}
