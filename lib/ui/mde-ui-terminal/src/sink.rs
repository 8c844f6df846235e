use std::io::Write;

use anyhow::{Context, Result};
use mde_domain::{Outcome, ResourceKind, ScopeConfig, Tally};
use mde_ports::ReportSink;
use mde_ui_presentation::{JsonReport, outcome_line, phase_header, summary_line};

/// Streams one line per outcome, flushing as it goes.
pub struct TextSink<'a, W: Write> {
    out: &'a mut W,
}

impl<'a, W: Write> TextSink<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        Self { out }
    }

    fn line(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{line}").context("failed to write report")?;
        self.out.flush().context("failed to flush report")
    }
}

impl<W: Write> ReportSink for TextSink<'_, W> {
    fn begin_phase(&mut self, phase: ResourceKind, expected: usize) -> Result<()> {
        self.line(&phase_header(phase, expected))
    }

    fn record(&mut self, outcome: &Outcome, tally: &Tally) -> Result<()> {
        self.line(&outcome_line(outcome, tally.total()))
    }

    fn finish(&mut self, tally: &Tally) -> Result<()> {
        self.line(&summary_line(tally))
    }
}

/// Buffers the run and writes a single JSON document at the end.
pub struct JsonSink<'a, W: Write> {
    out: &'a mut W,
    report: JsonReport,
}

impl<'a, W: Write> JsonSink<'a, W> {
    pub fn new(out: &'a mut W, scope: &ScopeConfig) -> Self {
        Self {
            out,
            report: JsonReport::new(scope.project_id(), scope.dataset_name()),
        }
    }
}

impl<W: Write> ReportSink for JsonSink<'_, W> {
    fn begin_phase(&mut self, phase: ResourceKind, _expected: usize) -> Result<()> {
        self.report.begin_phase(phase);
        Ok(())
    }

    fn record(&mut self, outcome: &Outcome, _tally: &Tally) -> Result<()> {
        self.report.push(outcome);
        Ok(())
    }

    fn finish(&mut self, tally: &Tally) -> Result<()> {
        self.report.close(tally);
        serde_json::to_writer_pretty(&mut *self.out, &self.report)
            .context("failed to write JSON report")?;
        writeln!(self.out).context("failed to write report")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mde_domain::Expectation;

    use super::*;

    #[test]
    fn text_sink_streams_header_lines_and_summary() {
        let mut buf = Vec::new();
        {
            let mut sink = TextSink::new(&mut buf);
            let mut tally = Tally::default();
            sink.begin_phase(ResourceKind::Topic, 1).unwrap();
            let outcome = Outcome::found(
                Expectation::new(ResourceKind::Topic, "input-messages", "acme-prod"),
                None,
            );
            tally.record(&outcome);
            sink.record(&outcome, &tally).unwrap();
            sink.finish(&tally).unwrap();
        }
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "== Topics (1) ==");
        assert!(lines[1].contains("input-messages"));
        assert_eq!(lines[2], "PASS: checked 1: 1 found, 0 missing, 0 errors");
    }
}
