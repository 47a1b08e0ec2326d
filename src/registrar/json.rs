//! JSON registrar.

use serde::Serialize;
use std::io::Write;

use super::ResourceRegistrar;
use crate::generator::RuleResources;
use crate::Result;

#[derive(Serialize)]
struct Batch<'a> {
    #[serde(rename = "type")]
    resource_type: &'a str,
    resources: &'a RuleResources,
}

/// Registrar that writes each batch as a pretty-printed JSON document.
///
/// ```json
/// {
///   "type": "concat::fragment",
///   "resources": {
///     "iptables_rule_v4_web-20-...": {
///       "target": "/var/lib/puppet/iptables/tables/v4_filter",
///       "content": "-A INPUT -s 10.0.0.1 -j ACCEPT\n",
///       "order": 100,
///       "ensure": "present"
///     }
///   }
/// }
/// ```
pub struct JsonRegistrar<W: Write> {
    writer: W,
}

impl<W: Write> JsonRegistrar<W> {
    /// Create a registrar writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the registrar, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResourceRegistrar for JsonRegistrar<W> {
    fn register(&mut self, resource_type: &str, resources: &RuleResources) -> Result<()> {
        let batch = Batch {
            resource_type,
            resources,
        };
        serde_json::to_writer_pretty(&mut self.writer, &batch)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        log::info!("Registered {} {} resources", resources.len(), resource_type);
        Ok(())
    }
}
