use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use dischargegraph_core::cli::{print_summary_table, summarize_logs, write_series_csv};
use dischargegraph_core::physics::{battery_percentage, time_remaining_hours};
use dischargegraph_core::storage::{
    battery_label, discover_logs, load_config, read_session_file, DEFAULT_CONFIG_PATH,
};
use dischargegraph_core::{analyze_session, telemetry, AnalyzeInputs, Analysis, TimeAnchor};

#[derive(Parser, Debug)]
#[command(author, version, about = "Batteriutladning: V, A, Ah og % fra loggfiler", long_about = None)]
struct Cli {
    /// Config-fil (JSON). Mangler den brukes default-kalibrering.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Skriv prometheus-tellere til stderr når kommandoen er ferdig
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sammendragstabell for alle battery*_out.text i en katalog
    Summary {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Per-sample serier for én logg som CSV
    Series {
        file: PathBuf,
        #[arg(long, value_enum)]
        anchor: Option<AnchorOpt>,
        /// Vindu for glidende snitt (overstyrer config)
        #[arg(long)]
        window: Option<usize>,
        /// Utfil (`-` for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,
    },
    /// Batteriprosent for en gitt spenning
    Percent {
        voltage: f64,
        /// Forventet last (A) for estimat av tid igjen
        #[arg(long)]
        load_a: Option<f64>,
        /// Kapasitet (Ah) for tid-igjen; ellers fra config
        #[arg(long)]
        capacity_ah: Option<f64>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AnchorOpt {
    First,
    Last,
}

impl From<AnchorOpt> for TimeAnchor {
    fn from(a: AnchorOpt) -> Self {
        match a {
            AnchorOpt::First => TimeAnchor::First,
            AnchorOpt::Last => TimeAnchor::Last,
        }
    }
}

fn main() -> Result<()> {
    // RUST_LOG overstyrer
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    telemetry::init();

    let cfg = load_config(&cli.config)
        .with_context(|| format!("kunne ikke laste config {}", cli.config.display()))?;

    match cli.command {
        Command::Summary { dir } => {
            let paths = discover_logs(&dir)
                .with_context(|| format!("kunne ikke liste {}", dir.display()))?;
            let rows = summarize_logs(&paths, &cfg)?;
            let stdout = io::stdout();
            print_summary_table(&mut stdout.lock(), &rows)?;
        }
        Command::Series {
            file,
            anchor,
            window,
            output,
        } => {
            let session = read_session_file(&file)?;
            let samples = session.map(|s| s.samples).unwrap_or_default();
            let battery = battery_label(&file);
            let cal = cfg.calibration_for(&battery);

            let analysis = analyze_session(AnalyzeInputs {
                samples: &samples,
                calibration: &cal,
                anchor: anchor.map(TimeAnchor::from).unwrap_or(cfg.anchor),
                smoothing_window: window.unwrap_or(cfg.smoothing_window),
            })?;
            telemetry::record_analysis(&analysis);

            match analysis {
                Analysis::NoData => {
                    eprintln!("Error: No valid data in {}.", file.display());
                }
                Analysis::Curve(curve) => {
                    if output.as_os_str() == "-" {
                        write_series_csv(io::stdout().lock(), &curve)?;
                    } else {
                        let f = File::create(&output)
                            .with_context(|| format!("kunne ikke opprette {}", output.display()))?;
                        write_series_csv(f, &curve)?;
                        log::info!("✅ Serier skrevet til {}", output.display());
                    }
                }
            }
        }
        Command::Percent {
            voltage,
            load_a,
            capacity_ah,
        } => {
            let cal = &cfg.calibration;
            let pct = battery_percentage(voltage, cal.full_voltage, cal.empty_voltage);
            let mut line = format!("Voltage: {voltage:.2} V  |  Battery: {pct}%");
            if let Some(load) = load_a {
                match capacity_ah.or(cal.rated_capacity_ah) {
                    Some(cap) => match time_remaining_hours(pct, cap, load) {
                        Some(h) => line.push_str(&format!("  |  Time left: {h:.2} h")),
                        None => line.push_str("  |  Time left: inf"),
                    },
                    None => log::warn!("mangler kapasitet (--capacity-ah eller rated_capacity_ah)"),
                }
            }
            println!("{line}");
        }
    }

    if cli.metrics {
        let text = telemetry::gather_text().context("prometheus-eksport feilet")?;
        io::stderr().write_all(text.as_bytes())?;
    }
    Ok(())
}
