//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Every command has a
//! `run` that writes to stdout and an `execute` that writes to any
//! `io::Write`.

pub mod check;
pub mod history;
pub mod scenario;
pub mod simulate;
