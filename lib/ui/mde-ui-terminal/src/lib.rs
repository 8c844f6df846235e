//! Terminal surface for the topology validator.

mod backend;
mod cli;
mod logging;
mod sink;

pub use backend::{Backend, GcloudBackend};
pub use cli::{Cli, OutputFormat, execute, main_exit, parse_args, resolve_scope};
pub use logging::init_tracing;
pub use sink::{JsonSink, TextSink};
