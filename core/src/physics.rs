// core/src/physics.rs
// Enhetsomregning og integrasjon for utladningskurver (Ohms lov, Ah, Wh).

pub const SECS_PER_HOUR: f64 = 3600.0;

// --- RoundTo trait (offentlig, brukt av metrics/cli) ---
pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 {
            return self.round();
        }
        let factor = 10_f64.powi(dp as i32);
        (self * factor).round() / factor
    }
}

/// avlesning → volt. Ingen klamping; verdier utenfor fysisk område slippes gjennom.
#[inline]
pub fn to_voltage(reading: f64, scale: f64) -> f64 {
    reading * scale
}

/// Ohms lov: I = V / R
#[inline]
pub fn to_current(voltage: f64, resistance_ohm: f64) -> f64 {
    voltage / resistance_ohm
}

/// P = V² / R
#[inline]
pub fn power_watt(voltage: f64, resistance_ohm: f64) -> f64 {
    voltage * to_current(voltage, resistance_ohm)
}

/// Løpende sum av I * dt (timer). Én verdi per sample.
pub fn cumulative_amp_hours(currents: &[f64], sample_interval_s: f64) -> Vec<f64> {
    let dt_h = sample_interval_s / SECS_PER_HOUR;
    let mut total = 0.0;
    currents
        .iter()
        .map(|&i| {
            total += i * dt_h;
            total
        })
        .collect()
}

/// Trapes-integrasjon for glattede serier: midtpunkt 0.5*(c[i]+c[i+1])
/// ganget med faktisk dt mellom samplene (ikke nominelt intervall).
/// Gir én verdi per intervall (n - 1).
pub fn cumulative_amp_hours_trapezoid(currents: &[f64], times_s: &[f64]) -> Vec<f64> {
    let n = currents.len().min(times_s.len());
    if n < 2 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(n - 1);
    let mut total = 0.0;
    for i in 0..n - 1 {
        // ut-av-rekkefølge tider gir dt = 0, aldri negativ ladning
        let dt_s = (times_s[i + 1] - times_s[i]).max(0.0);
        total += 0.5 * (currents[i] + currents[i + 1]) * dt_s / SECS_PER_HOUR;
        out.push(total);
    }
    out
}

/// Total energi (Wh) over økten, nominelt intervall.
pub fn total_watt_hours(voltages: &[f64], resistance_ohm: f64, sample_interval_s: f64) -> f64 {
    let dt_h = sample_interval_s / SECS_PER_HOUR;
    voltages
        .iter()
        .map(|&v| power_watt(v, resistance_ohm) * dt_h)
        .sum()
}

/// 100 * (1 - brukt/oppgitt). Kan bli negativ når batteriet tappes forbi
/// oppgitt kapasitet. `rated_ah` er validert > 0 i Calibration.
#[inline]
pub fn remaining_capacity_percent(used_ah: f64, rated_ah: f64) -> f64 {
    100.0 * (1.0 - used_ah / rated_ah)
}

/// Lineær spenning → prosent, klampet til [0, 100] og trunkert til heltall.
pub fn battery_percentage(voltage: f64, full_v: f64, empty_v: f64) -> u8 {
    if voltage >= full_v {
        100
    } else if voltage <= empty_v {
        0
    } else {
        // 0 < x < 100 her, `as` trunkerer mot null
        (100.0 * (voltage - empty_v) / (full_v - empty_v)) as u8
    }
}

/// Forventet Ah hvis strømmen holdt seg på startverdien hele økten.
#[inline]
pub fn expected_amp_hours(initial_voltage: f64, resistance_ohm: f64, duration_s: f64) -> f64 {
    to_current(initial_voltage, resistance_ohm) * (duration_s / SECS_PER_HOUR)
}

/// Timer igjen ved gitt last. None hvis lasten ikke er positiv.
pub fn time_remaining_hours(percent: u8, capacity_ah: f64, load_a: f64) -> Option<f64> {
    if load_a > 0.0 {
        let remaining_ah = capacity_ah * (f64::from(percent) / 100.0);
        Some(remaining_ah / load_a)
    } else {
        None
    }
}
