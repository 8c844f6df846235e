use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use mde_domain::{ProbeError, ProbeResult, ResourceKind};
use mde_ports::WarehousePort;
use serde::Deserialize;

use crate::command::{CommandPort, args, parse_rows};

const MAX_RESULTS: &str = "--max_results=10000";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableRow {
    table_reference: TableReference,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableReference {
    table_id: String,
}

/// Lists tables with `bq ls`.
pub struct BqWarehouse {
    cmd: Arc<dyn CommandPort>,
    project: String,
}

impl BqWarehouse {
    pub fn new(cmd: Arc<dyn CommandPort>, project: impl Into<String>) -> Self {
        Self {
            cmd,
            project: project.into(),
        }
    }

    async fn table_ids(&self, dataset: &str) -> Result<Vec<String>> {
        let target = format!("{}:{dataset}", self.project);
        let raw = self
            .cmd
            .run_capture("bq", &args(&["ls", "--format=json", MAX_RESULTS, target.as_str()]))
            .await?;
        let rows: Vec<TableRow> = parse_rows(&raw)?;
        Ok(rows
            .into_iter()
            .map(|row| row.table_reference.table_id)
            .collect())
    }
}

#[async_trait]
impl WarehousePort for BqWarehouse {
    async fn list_tables(&self, dataset: &str) -> Result<ProbeResult, ProbeError> {
        let ids = self
            .table_ids(dataset)
            .await
            .map_err(|err| ProbeError::from_anyhow(ResourceKind::Table, dataset, &err))?;
        Ok(ProbeResult::from_identifiers(ResourceKind::Table, dataset, ids))
    }
}
