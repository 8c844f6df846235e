use std::sync::Arc;

use async_trait::async_trait;
use mde_domain::{Expectation, ProbeError, ResourceKind};
use mde_ports::{ProbeVerdict, ResourceProbe, TopicPort};

pub struct TopicProbe {
    topics: Arc<dyn TopicPort>,
}

impl TopicProbe {
    pub fn new(topics: Arc<dyn TopicPort>) -> Self {
        Self { topics }
    }
}

/// `projects/p/topics/name` and `name` compare equal.
fn short_name(topic: &str) -> &str {
    topic.rsplit('/').next().unwrap_or(topic)
}

#[async_trait]
impl ResourceProbe for TopicProbe {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Topic
    }

    async fn probe(&self, expectation: &Expectation) -> Result<ProbeVerdict, ProbeError> {
        let topics = self.topics.list_topics(expectation.parent_scope()).await?;
        let wanted = short_name(expectation.identifier());
        if topics
            .entries
            .iter()
            .any(|entry| short_name(&entry.identifier) == wanted)
        {
            Ok(ProbeVerdict::found(None))
        } else {
            Ok(ProbeVerdict::missing(None))
        }
    }
}
