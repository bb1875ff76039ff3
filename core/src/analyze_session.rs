use crate::calibration::Calibration;
use crate::errors::CalibrationError;
use crate::logfile::truncate_at_sentinel;
use crate::metrics::{
    normalize_time, normalize_time_percent, remaining_ah_series, remaining_rated_ah_series,
    scaled_voltage, summarize,
};
use crate::models::{Sample, SmoothMode, TimeAnchor};
use crate::physics::{
    battery_percentage, cumulative_amp_hours, cumulative_amp_hours_trapezoid,
    remaining_capacity_percent, to_current, to_voltage,
};
use crate::smoothing::{odd_window, smooth};
use crate::types::{Analysis, DischargeCurve};

#[derive(Clone)]
pub struct AnalyzeInputs<'a> {
    /// Samples i loggerekkefølge. Sentinel (0.0) kuttes også her.
    pub samples: &'a [Sample],
    pub calibration: &'a Calibration,
    /// Hvilket sample som er t = 0 i `elapsed_s`
    pub anchor: TimeAnchor,
    /// Vindu for glidende snitt (partall rundes opp til oddetall)
    pub smoothing_window: usize,
}

/// Ren funksjon (samples, kalibrering) → avledede serier.
/// Ingen klokke, ingen tellere: samme input gir samme output.
///
/// Ugyldig kalibrering avvises før noe regnes ut. Tom økt etter filtrering
/// gir `Analysis::NoData`.
pub fn analyze_session(inputs: AnalyzeInputs) -> Result<Analysis, CalibrationError> {
    let cal = inputs.calibration;
    cal.validate()?;

    let samples = truncate_at_sentinel(inputs.samples);
    if samples.is_empty() {
        return Ok(Analysis::NoData);
    }

    // 1️⃣ Tid
    let elapsed_s = normalize_time(&samples, inputs.anchor);
    let elapsed_first_s = match inputs.anchor {
        TimeAnchor::First => elapsed_s.clone(),
        TimeAnchor::Last => normalize_time(&samples, TimeAnchor::First),
    };
    let elapsed_pct = normalize_time_percent(&samples);

    // 2️⃣ Spenning, strøm, prosent
    let voltage_v: Vec<f64> = samples
        .iter()
        .map(|s| to_voltage(s.reading, cal.voltage_scale))
        .collect();
    let current_a: Vec<f64> = voltage_v
        .iter()
        .map(|&v| to_current(v, cal.resistance_ohm))
        .collect();
    let battery_pct: Vec<u8> = voltage_v
        .iter()
        .map(|&v| battery_percentage(v, cal.full_voltage, cal.empty_voltage))
        .collect();

    // 3️⃣ Ladning (nominelt intervall)
    let amp_hours = cumulative_amp_hours(&current_a, cal.sample_interval_s);
    let remaining_ah = remaining_ah_series(&amp_hours);
    let remaining_pct = cal.rated_capacity_ah.map(|rated| {
        amp_hours
            .iter()
            .map(|&used| remaining_capacity_percent(used, rated))
            .collect::<Vec<f64>>()
    });
    let remaining_rated_ah = cal
        .rated_capacity_ah
        .map(|rated| remaining_rated_ah_series(&amp_hours, rated));
    let scaled_voltage = scaled_voltage(&voltage_v);

    // 4️⃣ Glatting (Valid: ingen skjeve kanter)
    let w = odd_window(inputs.smoothing_window);
    let smoothed_voltage_v = smooth(&voltage_v, w, SmoothMode::Valid);
    let smoothed_current_a = smooth(&current_a, w, SmoothMode::Valid);
    // Vindu i sentreres på sample i + w/2
    let half = w / 2;
    let smoothed_elapsed_s: Vec<f64> = elapsed_s
        .iter()
        .skip(half)
        .take(smoothed_voltage_v.len())
        .copied()
        .collect();
    let smoothed_amp_hours =
        cumulative_amp_hours_trapezoid(&smoothed_current_a, &smoothed_elapsed_s);

    // 5️⃣ Sammendrag
    let Some(summary) = summarize(&elapsed_first_s, &voltage_v, &amp_hours, cal) else {
        return Ok(Analysis::NoData);
    };

    log::debug!(
        "analyze_session: {} samples, {:.3} Ah, {:.3} Wh",
        summary.sample_count,
        summary.total_ah,
        summary.total_wh
    );

    Ok(Analysis::Curve(Box::new(DischargeCurve {
        anchor: inputs.anchor,
        elapsed_s,
        elapsed_pct,
        voltage_v,
        current_a,
        battery_pct,
        amp_hours,
        remaining_ah,
        remaining_pct,
        remaining_rated_ah,
        scaled_voltage,
        smoothing_window: w,
        smoothed_elapsed_s,
        smoothed_voltage_v,
        smoothed_current_a,
        smoothed_amp_hours,
        summary,
    })))
}
