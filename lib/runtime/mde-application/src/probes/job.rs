use std::sync::Arc;

use async_trait::async_trait;
use mde_domain::{Expectation, ProbeError, ResourceKind};
use mde_ports::{JobPort, ProbeVerdict, ResourceProbe};

/// Found when any active job name starts with the expected prefix. The job
/// state is reported but does not affect the verdict, so a draining job
/// still counts.
pub struct JobProbe {
    jobs: Arc<dyn JobPort>,
    region: String,
}

impl JobProbe {
    pub fn new(jobs: Arc<dyn JobPort>, region: impl Into<String>) -> Self {
        Self {
            jobs,
            region: region.into(),
        }
    }
}

#[async_trait]
impl ResourceProbe for JobProbe {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Job
    }

    async fn probe(&self, expectation: &Expectation) -> Result<ProbeVerdict, ProbeError> {
        let prefix = expectation.identifier();
        let listing = self
            .jobs
            .list_active_jobs(expectation.parent_scope(), &self.region, prefix)
            .await?;
        let states: Vec<&str> = listing
            .with_prefix(prefix)
            .map(|entry| entry.state.as_deref().unwrap_or("unknown"))
            .collect();
        if states.is_empty() {
            return Ok(ProbeVerdict::missing(Some(format!(
                "no active job in {}",
                self.region
            ))));
        }
        Ok(ProbeVerdict::found(Some(format!(
            "{} active ({})",
            states.len(),
            states.join(", ")
        ))))
    }
}
