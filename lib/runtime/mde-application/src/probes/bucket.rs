use std::sync::Arc;

use async_trait::async_trait;
use mde_domain::{Expectation, ProbeError, ResourceKind};
use mde_ports::{ProbeVerdict, ResourceProbe, StoragePort};

pub struct BucketProbe {
    storage: Arc<dyn StoragePort>,
}

impl BucketProbe {
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        Self { storage }
    }
}

fn normalize(uri: &str) -> &str {
    uri.trim().trim_end_matches('/')
}

#[async_trait]
impl ResourceProbe for BucketProbe {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Bucket
    }

    async fn probe(&self, expectation: &Expectation) -> Result<ProbeVerdict, ProbeError> {
        let buckets = self.storage.list_buckets(expectation.parent_scope()).await?;
        let wanted = normalize(expectation.identifier());
        let found = buckets
            .entries
            .iter()
            .any(|entry| normalize(&entry.identifier) == wanted);
        if found {
            Ok(ProbeVerdict::found(None))
        } else {
            Ok(ProbeVerdict::missing(Some(format!(
                "{} buckets visible, none match",
                buckets.entries.len()
            ))))
        }
    }
}
