//! Query clients backed by the managed-service command-line tools.

mod bigquery;
mod command;
mod dataflow;
mod gke;
mod pubsub;
mod storage;
mod toolchain;

use std::sync::Arc;

use mde_domain::ScopeConfig;
use mde_ports::ClientSet;

pub use bigquery::BqWarehouse;
pub use command::{CommandAdapter, CommandPort};
pub use dataflow::DataflowJobs;
pub use gke::GkeCluster;
pub use pubsub::PubsubTopics;
pub use storage::GcsBuckets;
pub use toolchain::{Toolchain, required_tools};

/// Clients for every backing service, sharing one command runner.
pub fn gcloud_clients(scope: &ScopeConfig, cmd: Arc<dyn CommandPort>) -> ClientSet {
    ClientSet {
        warehouse: Arc::new(BqWarehouse::new(cmd.clone(), scope.project_id())),
        cluster: Arc::new(GkeCluster::new(cmd.clone(), scope.project_id())),
        jobs: Arc::new(DataflowJobs::new(cmd.clone())),
        storage: Arc::new(GcsBuckets::new(cmd.clone())),
        topics: Arc::new(PubsubTopics::new(cmd)),
    }
}

#[cfg(test)]
mod testing;
