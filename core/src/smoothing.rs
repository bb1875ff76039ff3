use crate::models::SmoothMode;

/// Sørg for at vinduet er oddetall, slik at midtpunktet er veldefinert.
#[inline]
pub fn odd_window(window: usize) -> usize {
    match window {
        0 => 1,
        w if w % 2 == 0 => w + 1,
        w => w,
    }
}

/// Sentrert glidende snitt (kjerne = 1/w over w punkter).
///
/// `Valid`: kun fulle vinduer, lengde `n - (w - 1)` (tom hvis n < w).
/// `Same`: lengde `n`; kantene er null-paddet og derfor skjeve, trim med
/// [`trim_edges`] før de vises.
pub fn smooth(values: &[f64], window: usize, mode: SmoothMode) -> Vec<f64> {
    let w = odd_window(window);
    if w == 1 {
        return values.to_vec();
    }
    match mode {
        SmoothMode::Valid => valid_average(values, w),
        SmoothMode::Same => same_average(values, w),
    }
}

fn valid_average(values: &[f64], w: usize) -> Vec<f64> {
    if values.len() < w {
        return Vec::new();
    }
    // hvert vindu summeres for seg
    values
        .windows(w)
        .map(|win| win.iter().sum::<f64>() / w as f64)
        .collect()
}

fn same_average(values: &[f64], w: usize) -> Vec<f64> {
    let n = values.len();
    let k = w / 2;
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let a = i.saturating_sub(k);
        let b = (i + k + 1).min(n);
        // manglende naboer teller som 0 (nevneren er alltid w)
        let s: f64 = values[a..b].iter().sum();
        out.push(s / w as f64);
    }
    out
}

/// Fjern w/2 punkter i hver ende (Same-modus kanter).
pub fn trim_edges(values: &[f64], window: usize) -> &[f64] {
    let k = odd_window(window) / 2;
    if values.len() <= 2 * k {
        return &[];
    }
    &values[k..values.len() - k]
}

/// Vindu fra seriens lengde: max(1, n / divisor), rundet opp til oddetall.
pub fn window_for_len(len: usize, divisor: usize) -> usize {
    let raw = if divisor == 0 { 1 } else { (len / divisor).max(1) };
    odd_window(raw)
}

/// Hvert `step`-te punkt (for plotting).
pub fn downsample<T: Copy>(values: &[T], step: usize) -> Vec<T> {
    values.iter().step_by(step.max(1)).copied().collect()
}
