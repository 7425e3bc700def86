//! File output for simulation results.

/// CSV telemetry export.
pub mod export;
