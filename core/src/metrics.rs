use ordered_float::OrderedFloat;

use crate::calibration::Calibration;
use crate::models::{Sample, TimeAnchor};
use crate::physics::{expected_amp_hours, remaining_capacity_percent, total_watt_hours, RoundTo};
use crate::types::DischargeSummary;

/// Forskyv tidene slik at første eller siste sample havner på 0.
/// Ingen resampling, avstanden mellom samplene beholdes.
pub fn normalize_time(samples: &[Sample], anchor: TimeAnchor) -> Vec<f64> {
    let origin = match anchor {
        TimeAnchor::First => samples.first(),
        TimeAnchor::Last => samples.last(),
    };
    let Some(origin) = origin else {
        return Vec::new();
    };
    samples.iter().map(|s| s.t - origin.t).collect()
}

/// Tid som prosent av total kjøretid: (t - t0) / (tN - t0) * 100.
/// Én sample (eller null varighet) => alle 0.
pub fn normalize_time_percent(samples: &[Sample]) -> Vec<f64> {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return Vec::new();
    };
    let span = last.t - first.t;
    if span == 0.0 {
        return vec![0.0; samples.len()];
    }
    samples.iter().map(|s| (s.t - first.t) / span * 100.0).collect()
}

/// Ah igjen av det økten faktisk leverte: total - kumulativ.
pub fn remaining_ah_series(cumulative_ah: &[f64]) -> Vec<f64> {
    let total = cumulative_ah.last().copied().unwrap_or(0.0);
    cumulative_ah.iter().map(|ah| total - ah).collect()
}

/// (min, max) spenning. None for tom serie.
pub fn voltage_extremes(voltages: &[f64]) -> Option<(f64, f64)> {
    let min = voltages.iter().copied().map(OrderedFloat).min()?;
    let max = voltages.iter().copied().map(OrderedFloat).max()?;
    Some((min.into_inner(), max.into_inner()))
}

/// Ah igjen av oppgitt kapasitet: rated - kumulativ (kan bli negativ).
pub fn remaining_rated_ah_series(cumulative_ah: &[f64], rated_ah: f64) -> Vec<f64> {
    cumulative_ah.iter().map(|ah| rated_ah - ah).collect()
}

/// Min-max skalering av spenning til 0..1 ("strukket" y-akse).
/// None for tom serie eller når alle verdier er like.
pub fn scaled_voltage(voltages: &[f64]) -> Option<Vec<f64>> {
    let (min, max) = voltage_extremes(voltages)?;
    let range = max - min;
    if range == 0.0 {
        return None;
    }
    Some(voltages.iter().map(|v| (v - min) / range).collect())
}

/// Sammendrag for tabell/rapport. Tom input gir None.
pub fn summarize(
    elapsed_first_s: &[f64],
    voltages: &[f64],
    cumulative_ah: &[f64],
    cal: &Calibration,
) -> Option<DischargeSummary> {
    let final_voltage = *voltages.last()?;
    let (min_v, max_v) = voltage_extremes(voltages)?;

    // varighet = siste tidsstempel relativt til første
    let discharge_time_s = elapsed_first_s.last().copied().unwrap_or(0.0);
    let total_ah = cumulative_ah.last().copied().unwrap_or(0.0);

    Some(DischargeSummary {
        sample_count: voltages.len(),
        discharge_time_s,
        discharge_time_h: (discharge_time_s / 3600.0).round_to(2),
        final_voltage_v: final_voltage.round_to(3),
        min_voltage_v: min_v,
        max_voltage_v: max_v,
        expected_ah: cal
            .initial_voltage
            .map(|v0| expected_amp_hours(v0, cal.resistance_ohm, discharge_time_s).round_to(2)),
        total_ah: total_ah.round_to(3),
        total_wh: total_watt_hours(voltages, cal.resistance_ohm, cal.sample_interval_s).round_to(3),
        rated_capacity_ah: cal.rated_capacity_ah,
        remaining_pct_final: cal
            .rated_capacity_ah
            .map(|rated| remaining_capacity_percent(total_ah, rated).round_to(2)),
    })
}
