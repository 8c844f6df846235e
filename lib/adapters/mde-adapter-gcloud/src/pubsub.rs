use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use mde_domain::{ProbeError, ProbeResult, ResourceKind};
use mde_ports::TopicPort;
use serde::Deserialize;

use crate::command::{CommandPort, args, parse_rows};

#[derive(Debug, Deserialize)]
struct TopicRow {
    name: String,
}

/// Lists topics with `gcloud pubsub topics list`. Names keep their full
/// `projects/<p>/topics/<name>` form.
pub struct PubsubTopics {
    cmd: Arc<dyn CommandPort>,
}

impl PubsubTopics {
    pub fn new(cmd: Arc<dyn CommandPort>) -> Self {
        Self { cmd }
    }

    async fn topic_names(&self, project: &str) -> Result<Vec<String>> {
        let raw = self
            .cmd
            .run_capture(
                "gcloud",
                &args(&[
                    "pubsub",
                    "topics",
                    "list",
                    "--project",
                    project,
                    "--format=json",
                ]),
            )
            .await?;
        let rows: Vec<TopicRow> = parse_rows(&raw)?;
        Ok(rows.into_iter().map(|row| row.name).collect())
    }
}

#[async_trait]
impl TopicPort for PubsubTopics {
    async fn list_topics(&self, project: &str) -> Result<ProbeResult, ProbeError> {
        let names = self
            .topic_names(project)
            .await
            .map_err(|err| ProbeError::from_anyhow(ResourceKind::Topic, project, &err))?;
        Ok(ProbeResult::from_identifiers(ResourceKind::Topic, project, names))
    }
}
