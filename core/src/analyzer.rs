use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::analyze_session::{analyze_session, AnalyzeInputs};
use crate::calibration::AnalyzerConfig;
use crate::errors::AnalyzerError;
use crate::models::Sample;
use crate::telemetry;
use crate::types::Analysis;

// Tolerant sample-inngang: objekt eller [t, reading]-par
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SampleIn {
    Object {
        t: f64,
        #[serde(alias = "v", alias = "value")]
        reading: f64,
    },
    Pair(f64, f64),
}

impl From<SampleIn> for Sample {
    fn from(s: SampleIn) -> Self {
        match s {
            SampleIn::Object { t, reading } => Sample { t, reading },
            SampleIn::Pair(t, reading) => Sample { t, reading },
        }
    }
}

fn parse_json<'de, T: Deserialize<'de>>(text: &'de str) -> Result<T, AnalyzerError> {
    let de = &mut serde_json::Deserializer::from_str(text);
    serde_path_to_error::deserialize(de).map_err(AnalyzerError::from_path_error)
}

/// JSON inn, JSON ut – brukes av Python-bindingen og golden-tests.
///
/// Tom økt gir `{"ok": false, "reason": "no_valid_data"}`; ugyldig
/// kalibrering gir `Err`.
pub fn analyze_session_json(
    samples_json: &str,
    config_json: Option<&str>,
) -> Result<String, AnalyzerError> {
    let raw: Vec<SampleIn> = parse_json(samples_json)?;
    let samples: Vec<Sample> = raw.into_iter().map(Sample::from).collect();

    let cfg: AnalyzerConfig = match config_json {
        Some(text) => parse_json(text)?,
        None => AnalyzerConfig::default(),
    };
    cfg.validate()?;

    let analysis = analyze_session(AnalyzeInputs {
        samples: &samples,
        calibration: &cfg.calibration,
        anchor: cfg.anchor,
        smoothing_window: cfg.smoothing_window,
    })?;
    telemetry::record_analysis(&analysis);

    let out: Value = match analysis {
        Analysis::NoData => json!({
            "ok": false,
            "reason": "no_valid_data"
        }),
        Analysis::Curve(curve) => {
            let curve = serde_json::to_value(&*curve)?;
            json!({
                "ok": true,
                "analyzed_at": Utc::now().to_rfc3339(),
                "curve": curve
            })
        }
    };
    Ok(serde_json::to_string(&out)?)
}
