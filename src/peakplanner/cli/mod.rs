//! # CLI Layer
//!
//! One UI client for the planner. This is the only place that parses arguments, prints,
//! installs the tracing subscriber and decides exit codes.
//!
//! - [`setup`]: clap argument definitions
//! - [`commands`]: dispatch, context setup and per-command handlers
//! - [`render`]: turns `CmdResult`s into terminal text

pub mod commands;
pub mod render;
pub mod setup;

pub use commands::run;
