use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Utc;

use crate::analyze_session::{analyze_session, AnalyzeInputs};
use crate::calibration::AnalyzerConfig;
use crate::errors::StorageError;
use crate::storage::{battery_label, read_session_file};
use crate::telemetry;
use crate::types::{Analysis, BatterySummary, DischargeCurve};

/// Analyser en liste loggfiler. Manglende/tomme filer logges og hoppes over.
pub fn summarize_logs(
    paths: &[PathBuf],
    cfg: &AnalyzerConfig,
) -> Result<Vec<BatterySummary>, StorageError> {
    let mut rows = Vec::with_capacity(paths.len());

    for path in paths {
        let Some(session) = read_session_file(path)? else {
            continue;
        };

        let battery = battery_label(path);
        let cal = cfg.calibration_for(&battery);
        let analysis = analyze_session(AnalyzeInputs {
            samples: &session.samples,
            calibration: &cal,
            anchor: cfg.anchor,
            smoothing_window: cfg.smoothing_window,
        })?;
        telemetry::record_analysis(&analysis);

        match analysis {
            Analysis::NoData => {
                log::warn!(
                    "{} is empty or contains only zero voltage. Skipping...",
                    path.display()
                );
            }
            Analysis::Curve(curve) => {
                let curve = *curve;
                log::info!(
                    "{}: {} samples, {:.3} Ah",
                    battery,
                    curve.summary.sample_count,
                    curve.summary.total_ah
                );
                rows.push(BatterySummary {
                    advertised_ah: cfg.advertised_ah.get(&battery).copied(),
                    battery,
                    summary: curve.summary,
                    analyzed_at: Utc::now(),
                });
            }
        }
    }

    Ok(rows)
}

/// Tabell i samme format som det gamle sammendragsskriptet.
pub fn print_summary_table<W: Write>(out: &mut W, rows: &[BatterySummary]) -> io::Result<()> {
    if rows.is_empty() {
        writeln!(out, "No valid battery data found.")?;
        return Ok(());
    }

    writeln!(out, "\nBattery Discharge Summary:\n")?;
    writeln!(
        out,
        "{:<10} {:<15} {:<20} {:<20} {:<20} {:<15} {:<15} {:<15}",
        "Battery#",
        "Advertised Ah",
        "Discharge Time (s)",
        "Discharge Time (h)",
        "Final Voltage (V)",
        "Calculated Ah",
        "Total Ah",
        "Total Wh"
    )?;
    writeln!(out, "{}", "=".repeat(135))?;

    for row in rows {
        let s = &row.summary;
        let advertised = row
            .advertised_ah
            .map(|ah| ah.to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        let expected = s
            .expected_ah
            .map(|ah| ah.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:<10} {:<15} {:<20.1} {:<20} {:<20} {:<15} {:<15} {:<15}",
            row.battery,
            advertised,
            s.discharge_time_s,
            s.discharge_time_h,
            s.final_voltage_v,
            expected,
            s.total_ah,
            s.total_wh
        )?;
    }
    Ok(())
}

/// Per-sample serier som CSV (for plotting utenfor crate-en).
pub fn write_series_csv<W: Write>(out: W, curve: &DischargeCurve) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([
        "elapsed_s",
        "elapsed_pct",
        "voltage_v",
        "current_a",
        "battery_pct",
        "amp_hours",
        "remaining_ah",
        "remaining_pct",
        "smoothed_voltage_v",
    ])?;

    // glattet serie er kortere; plasser den på midtpunktet av vinduet
    let half = curve.smoothing_window / 2;

    for i in 0..curve.voltage_v.len() {
        let remaining_pct = curve
            .remaining_pct
            .as_ref()
            .and_then(|r| r.get(i))
            .map(|p| format!("{p:.3}"))
            .unwrap_or_default();
        let smoothed = i
            .checked_sub(half)
            .and_then(|j| curve.smoothed_voltage_v.get(j))
            .map(|v| format!("{v:.4}"))
            .unwrap_or_default();

        wtr.write_record([
            format!("{}", curve.elapsed_s[i]),
            format!("{:.3}", curve.elapsed_pct[i]),
            format!("{:.4}", curve.voltage_v[i]),
            format!("{:.4}", curve.current_a[i]),
            curve.battery_pct[i].to_string(),
            format!("{:.6}", curve.amp_hours[i]),
            format!("{:.6}", curve.remaining_ah[i]),
            remaining_pct,
            smoothed,
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
