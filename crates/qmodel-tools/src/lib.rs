//! Development tooling for qmodel.
//!
//! Installs a `tracing` subscriber so the structured events emitted by the
//! model crates can be inspected in tests, benchmarks and downstream tools.

pub mod logging;

pub use logging::{LoggingError, enable_logging};
