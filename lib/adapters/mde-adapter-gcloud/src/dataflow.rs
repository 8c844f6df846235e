use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use mde_domain::{InventoryEntry, ProbeError, ProbeResult, ResourceKind};
use mde_ports::JobPort;
use serde::Deserialize;

use crate::command::{CommandPort, args, parse_rows};

#[derive(Debug, Deserialize)]
struct JobRow {
    name: String,
    #[serde(default)]
    state: Option<String>,
}

/// Lists active streaming jobs with `gcloud dataflow jobs list`.
pub struct DataflowJobs {
    cmd: Arc<dyn CommandPort>,
}

impl DataflowJobs {
    pub fn new(cmd: Arc<dyn CommandPort>) -> Self {
        Self { cmd }
    }

    async fn active(
        &self,
        project: &str,
        region: &str,
        prefix: &str,
    ) -> Result<Vec<InventoryEntry>> {
        let filter = format!("--filter=name:{prefix}");
        let raw = self
            .cmd
            .run_capture(
                "gcloud",
                &args(&[
                    "dataflow",
                    "jobs",
                    "list",
                    "--project",
                    project,
                    "--region",
                    region,
                    "--status=active",
                    filter.as_str(),
                    "--format=json",
                ]),
            )
            .await?;
        let rows: Vec<JobRow> = parse_rows(&raw)?;
        Ok(rows
            .into_iter()
            .map(|row| match row.state {
                Some(state) => InventoryEntry::with_state(row.name, state),
                None => InventoryEntry::new(row.name),
            })
            .collect())
    }
}

#[async_trait]
impl JobPort for DataflowJobs {
    async fn list_active_jobs(
        &self,
        project: &str,
        region: &str,
        name_prefix: &str,
    ) -> Result<ProbeResult, ProbeError> {
        let entries = self
            .active(project, region, name_prefix)
            .await
            .map_err(|err| ProbeError::from_anyhow(ResourceKind::Job, project, &err))?;
        Ok(ProbeResult::new(ResourceKind::Job, project, entries))
    }
}
