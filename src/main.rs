//! Simulator entry point: CLI wiring and config-driven engine construction.

use std::path::Path;
use std::process;
use std::thread;
use std::time::Duration;

use bems_sim::building::sample_building;
use bems_sim::config::Settings;
use bems_sim::io::export::export_csv;
use bems_sim::reporting::{ConsoleReporter, ReportSink};
use bems_sim::sim::engine::Engine;
use bems_sim::sim::scheduler::Scheduler;

/// Default number of headless ticks: one simulated day at one minute per tick.
const DEFAULT_TICKS: usize = 1440;

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    seed_override: Option<u64>,
    ticks: usize,
    live_secs: Option<u64>,
    telemetry_out: Option<String>,
}

fn print_help() {
    eprintln!("bems-sim — Building energy management simulator");
    eprintln!();
    eprintln!("Usage: bems-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load settings from a TOML config file");
    eprintln!("  --seed <u64>             Override the random seed");
    eprintln!("  --ticks <n>              Headless ticks to run (default: {DEFAULT_TICKS})");
    eprintln!("  --live-secs <n>          Drive the real-time scheduler for n seconds instead");
    eprintln!("  --telemetry-out <path>   Export tick reports to CSV (headless mode)");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("Without --config, the built-in default settings are used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        seed_override: None,
        ticks: DEFAULT_TICKS,
        live_secs: None,
        telemetry_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --config requires a path argument");
                    process::exit(1);
                }
                cli.config_path = Some(args[i].clone());
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--ticks" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --ticks requires a number argument");
                    process::exit(1);
                }
                if let Ok(n) = args[i].parse::<usize>() {
                    cli.ticks = n;
                } else {
                    eprintln!("error: --ticks value \"{}\" is not a valid number", args[i]);
                    process::exit(1);
                }
            }
            "--live-secs" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --live-secs requires a number argument");
                    process::exit(1);
                }
                if let Ok(n) = args[i].parse::<u64>() {
                    cli.live_secs = Some(n);
                } else {
                    eprintln!(
                        "error: --live-secs value \"{}\" is not a valid number",
                        args[i]
                    );
                    process::exit(1);
                }
            }
            "--telemetry-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --telemetry-out requires a path argument");
                    process::exit(1);
                }
                cli.telemetry_out = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    let cli = parse_args();

    // Load settings: --config takes priority, then built-in defaults
    let mut settings = if let Some(ref path) = cli.config_path {
        match Settings::from_toml_file(Path::new(path)) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        Settings::default()
    };

    // Apply seed override
    if let Some(seed) = cli.seed_override {
        settings.simulation.seed = Some(seed);
    }

    // Validate
    let errors = settings.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    let engine_settings = match settings.engine_settings() {
        Ok(es) => es,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // Build the engine over the fixed sample layout
    let engine = match Engine::new(sample_building(), &engine_settings) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    if let Some(secs) = cli.live_secs {
        run_live(engine, settings.tick_period(), secs);
    } else {
        run_headless(engine, cli.ticks, cli.telemetry_out.as_deref());
    }
}

/// Drives the real-time scheduler for a fixed wall-clock duration.
fn run_live(engine: Engine, tick_period: Duration, secs: u64) {
    let mut scheduler = Scheduler::new(engine, tick_period);
    if let Err(e) = scheduler.start(ConsoleReporter::new()) {
        eprintln!("{e}");
        process::exit(1);
    }
    thread::sleep(Duration::from_secs(secs));
    scheduler.stop();
}

/// Runs the tick pipeline back to back and optionally exports CSV telemetry.
fn run_headless(mut engine: Engine, ticks: usize, telemetry_out: Option<&str>) {
    let mut reporter = ConsoleReporter::new();
    let mut reports = Vec::with_capacity(ticks);
    for _ in 0..ticks {
        let report = engine.step();
        if let Err(e) = reporter.publish(&report) {
            eprintln!("report sink failed, tick continues: {e}");
        }
        reports.push(report);
    }

    if let Some(path) = telemetry_out {
        if let Err(e) = export_csv(&reports, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {path}");
    }
}
