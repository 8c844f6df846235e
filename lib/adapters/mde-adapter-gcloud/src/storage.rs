use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use mde_domain::{ProbeError, ProbeResult, ResourceKind};
use mde_ports::StoragePort;
use serde::Deserialize;

use crate::command::{CommandPort, args, parse_rows};

#[derive(Debug, Deserialize)]
struct BucketRow {
    name: String,
    #[serde(default)]
    storage_url: Option<String>,
}

impl BucketRow {
    fn uri(self) -> String {
        self.storage_url
            .unwrap_or_else(|| format!("gs://{}/", self.name))
    }
}

/// Lists buckets with `gcloud storage buckets list`.
pub struct GcsBuckets {
    cmd: Arc<dyn CommandPort>,
}

impl GcsBuckets {
    pub fn new(cmd: Arc<dyn CommandPort>) -> Self {
        Self { cmd }
    }

    async fn bucket_uris(&self, project: &str) -> Result<Vec<String>> {
        let raw = self
            .cmd
            .run_capture(
                "gcloud",
                &args(&[
                    "storage",
                    "buckets",
                    "list",
                    "--project",
                    project,
                    "--format=json",
                ]),
            )
            .await?;
        let rows: Vec<BucketRow> = parse_rows(&raw)?;
        Ok(rows.into_iter().map(BucketRow::uri).collect())
    }
}

#[async_trait]
impl StoragePort for GcsBuckets {
    async fn list_buckets(&self, project: &str) -> Result<ProbeResult, ProbeError> {
        let uris = self
            .bucket_uris(project)
            .await
            .map_err(|err| ProbeError::from_anyhow(ResourceKind::Bucket, project, &err))?;
        Ok(ProbeResult::from_identifiers(ResourceKind::Bucket, project, uris))
    }
}
