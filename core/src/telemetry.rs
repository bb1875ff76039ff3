use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

use crate::types::Analysis;

// Registreringen feiler kun ved duplikat navn i default-registeret.
pub static LINES_SKIPPED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "dischargegraph_lines_skipped_total",
        "Logglinjer forkastet (feil antall felt / ikke-tall)"
    )
    .expect("register dischargegraph_lines_skipped_total")
});

pub static SAMPLES_ACCEPTED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "dischargegraph_samples_accepted_total",
        "Samples lest før sentinel"
    )
    .expect("register dischargegraph_samples_accepted_total")
});

pub static SESSIONS_ANALYZED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "dischargegraph_sessions_analyzed_total",
        "Økter med minst ett gyldig sample"
    )
    .expect("register dischargegraph_sessions_analyzed_total")
});

pub static SESSIONS_EMPTY: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "dischargegraph_sessions_empty_total",
        "Økter uten gyldige data"
    )
    .expect("register dischargegraph_sessions_empty_total")
});

/// Tving registrering slik at alle tellere vises i eksporten også ved 0.
pub fn init() {
    Lazy::force(&LINES_SKIPPED);
    Lazy::force(&SAMPLES_ACCEPTED);
    Lazy::force(&SESSIONS_ANALYZED);
    Lazy::force(&SESSIONS_EMPTY);
}

/// Tell én ferdig analyse. Kalles av den som leser/skriver, ikke av analysen.
pub fn record_analysis(analysis: &Analysis) {
    match analysis {
        Analysis::NoData => SESSIONS_EMPTY.inc(),
        Analysis::Curve(_) => SESSIONS_ANALYZED.inc(),
    }
}

/// Prometheus tekstformat for default-registeret.
pub fn gather_text() -> Result<String, prometheus::Error> {
    init();
    let mut buf = Vec::new();
    TextEncoder::new().encode(&prometheus::gather(), &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
