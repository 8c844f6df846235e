use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Runs an external program and captures its standard output.
#[async_trait]
pub trait CommandPort: Send + Sync {
    async fn run_capture(&self, program: &str, args: &[String]) -> Result<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CommandAdapter;

impl CommandAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandPort for CommandAdapter {
    async fn run_capture(&self, program: &str, args: &[String]) -> Result<String> {
        debug!(program, args = ?args, "running command");
        let output = Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("failed to start `{program}`"))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "`{program} {}` exited with {}: {}",
                args.join(" "),
                output.status,
                stderr.trim()
            );
        }
        String::from_utf8(output.stdout)
            .with_context(|| format!("`{program}` wrote non-utf8 output"))
    }
}

/// Parse a JSON array printed by a CLI; blank output means no rows.
pub(crate) fn parse_rows<T: serde::de::DeserializeOwned>(raw: &str) -> Result<Vec<T>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("malformed JSON listing")
}

pub(crate) fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
