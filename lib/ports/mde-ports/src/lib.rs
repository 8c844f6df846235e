//! Port traits between the validation runtime and the outside world.

mod clients;
mod probe;
mod report;

pub use clients::{
    ClientSet, ClusterLocation, ClusterPort, DependencyCheck, JobPort, StoragePort, TopicPort,
    WarehousePort,
};
pub use probe::{ProbeSet, ProbeVerdict, ResourceProbe};
pub use report::ReportSink;
