use std::sync::Mutex;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::command::CommandPort;

/// Replays canned output keyed by the first argument that matches.
#[derive(Default)]
pub struct FakeCommand {
    pub replies: Vec<(&'static str, Result<String, String>)>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeCommand {
    pub fn reply(mut self, needle: &'static str, out: &str) -> Self {
        self.replies.push((needle, Ok(out.to_string())));
        self
    }

    pub fn fail(mut self, needle: &'static str, err: &str) -> Self {
        self.replies.push((needle, Err(err.to_string())));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandPort for FakeCommand {
    async fn run_capture(&self, program: &str, args: &[String]) -> Result<String> {
        let line = format!("{program} {}", args.join(" "));
        self.calls.lock().unwrap().push(line.clone());
        self.replies
            .iter()
            .find(|(needle, _)| line.contains(needle))
            .map(|(_, reply)| reply.clone().map_err(|err| anyhow!(err)))
            .unwrap_or_else(|| Err(anyhow!("unexpected command: {line}")))
    }
}
