//! Topology validation for MDE deployments.
//!
//! The workspace crates are re-exported here so embedders can drive a
//! [`Validator`](mde_application::Validator) with their own ports.

pub use mde_application as application;
pub use mde_domain as domain;
pub use mde_ports as ports;

#[cfg(feature = "cli")]
pub use mde_ui_terminal as terminal;
