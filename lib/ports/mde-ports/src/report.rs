use anyhow::Result;
use mde_domain::{Outcome, ResourceKind, Tally};

/// Receives outcomes as they are produced, in order.
pub trait ReportSink {
    fn begin_phase(&mut self, phase: ResourceKind, expected: usize) -> Result<()>;

    /// `tally` already includes `outcome`.
    fn record(&mut self, outcome: &Outcome, tally: &Tally) -> Result<()>;

    fn finish(&mut self, tally: &Tally) -> Result<()>;
}
