use std::sync::Arc;

use async_trait::async_trait;
use mde_domain::{Expectation, ProbeError, ResourceKind};
use mde_ports::{ProbeVerdict, ResourceProbe, WarehousePort};
use tracing::debug;

pub struct TableProbe {
    warehouse: Arc<dyn WarehousePort>,
}

impl TableProbe {
    pub fn new(warehouse: Arc<dyn WarehousePort>) -> Self {
        Self { warehouse }
    }
}

#[async_trait]
impl ResourceProbe for TableProbe {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Table
    }

    async fn probe(&self, expectation: &Expectation) -> Result<ProbeVerdict, ProbeError> {
        let dataset = expectation.parent_scope();
        let tables = self.warehouse.list_tables(dataset).await?;
        debug!(dataset, tables = tables.entries.len(), "listed tables");
        if tables.contains(expectation.identifier()) {
            Ok(ProbeVerdict::found(None))
        } else {
            Ok(ProbeVerdict::missing(Some(format!(
                "not in dataset {dataset}"
            ))))
        }
    }
}
