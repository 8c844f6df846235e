use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of deployed resource; one validation phase per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Table,
    Workload,
    Job,
    Bucket,
    Topic,
}

impl ResourceKind {
    /// Fixed phase order.
    pub const PHASES: [ResourceKind; 5] = [
        ResourceKind::Table,
        ResourceKind::Workload,
        ResourceKind::Job,
        ResourceKind::Bucket,
        ResourceKind::Topic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Table => "table",
            ResourceKind::Workload => "workload",
            ResourceKind::Job => "job",
            ResourceKind::Bucket => "bucket",
            ResourceKind::Topic => "topic",
        }
    }

    pub fn phase_title(self) -> &'static str {
        match self {
            ResourceKind::Table => "Tables",
            ResourceKind::Workload => "Workloads",
            ResourceKind::Job => "Jobs",
            ResourceKind::Bucket => "Buckets",
            ResourceKind::Topic => "Topics",
        }
    }

    pub fn phase_index(self) -> usize {
        match self {
            ResourceKind::Table => 0,
            ResourceKind::Workload => 1,
            ResourceKind::Job => 2,
            ResourceKind::Bucket => 3,
            ResourceKind::Topic => 4,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "table" | "tables" => Ok(ResourceKind::Table),
            "workload" | "workloads" => Ok(ResourceKind::Workload),
            "job" | "jobs" => Ok(ResourceKind::Job),
            "bucket" | "buckets" => Ok(ResourceKind::Bucket),
            "topic" | "topics" => Ok(ResourceKind::Topic),
            other => Err(format!("unknown resource kind: {other}")),
        }
    }
}
