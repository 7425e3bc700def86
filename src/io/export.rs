//! CSV export for tick reports.
//!
//! The topology is dynamic, so the export uses a long format: one row per
//! sensor reading, one per equipment status, and one total row per tick.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::TickReport;

/// Schema v1 column header for CSV telemetry export.
const HEADER: &str = "timestamp,record,id,detail,value";

/// Timestamp column format.
const TS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Exports tick reports to a CSV file at the given path.
///
/// Writes a header row followed by the long-format rows of every tick.
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(reports: &[TickReport], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(reports, buf)
}

/// Writes tick reports as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(reports: &[TickReport], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(HEADER.split(','))?;

    // One row group per tick: sensors, equipment, total
    for report in reports {
        let stamp = report.timestamp.format(TS_FORMAT).to_string();

        for sample in &report.sensors {
            wtr.write_record(&[
                stamp.clone(),
                "sensor".to_string(),
                sample.sensor_id.clone(),
                sample.kind.label().to_string(),
                sample.value.map(|v| format!("{v:.4}")).unwrap_or_default(),
            ])?;
        }

        for unit in &report.equipment {
            wtr.write_record(&[
                stamp.clone(),
                "equipment".to_string(),
                unit.id.clone(),
                if unit.running { "on" } else { "off" }.to_string(),
                format!("{:.4}", unit.consumption_w),
            ])?;
        }

        wtr.write_record(&[
            stamp,
            "total".to_string(),
            "building".to_string(),
            String::new(),
            format!("{:.4}", report.total_consumption_w),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
