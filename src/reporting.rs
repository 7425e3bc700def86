//! Reporting sinks consuming tick snapshots.
//!
//! The engine and scheduler only know the [`ReportSink`] trait; format and
//! destination are the sink's concern.

use std::io::{self, Write};

use crate::sim::types::TickReport;

/// Destination for per-tick simulation state.
pub trait ReportSink {
    /// Publishes one tick report.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` when the destination is unavailable. The
    /// scheduler treats this as transient and keeps ticking.
    fn publish(&mut self, report: &TickReport) -> io::Result<()>;
}

/// Prints the full simulation state to stdout.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    fn write_report<W: Write>(out: &mut W, report: &TickReport) -> io::Result<()> {
        let stamp = report.timestamp.format("%Y-%m-%d %H:%M");
        writeln!(
            out,
            "Total energy consumption at {stamp}: {:.2} kW",
            report.total_consumption_kw()
        )?;
        writeln!(out, "Simulation state at {stamp}")?;

        let mut current_floor = None;
        for sample in &report.sensors {
            if current_floor != Some(sample.floor) {
                writeln!(out, "Floor {}", sample.floor)?;
                current_floor = Some(sample.floor);
            }
            match sample.value {
                Some(value) => writeln!(out, "  {}: {value:.2}", sample.sensor_id)?,
                None => writeln!(out, "  {}: n/a", sample.sensor_id)?,
            }
        }

        for unit in &report.equipment {
            writeln!(
                out,
                "{}: {}, Consumption: {:.2} W",
                unit.name,
                if unit.running { "ON" } else { "OFF" },
                unit.consumption_w
            )?;
        }
        writeln!(out)
    }
}

impl ReportSink for ConsoleReporter {
    fn publish(&mut self, report: &TickReport) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        Self::write_report(&mut out, report)
    }
}
