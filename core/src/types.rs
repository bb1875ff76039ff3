use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::TimeAnchor;

/// Avledede serier for én økt. Alle per-sample serier har samme lengde.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DischargeCurve {
    pub anchor: TimeAnchor,
    pub elapsed_s: Vec<f64>,          // normalisert tid (sek)
    pub elapsed_pct: Vec<f64>,        // 0..100 av total kjøretid
    pub voltage_v: Vec<f64>,
    pub current_a: Vec<f64>,
    pub battery_pct: Vec<u8>,         // spenningsbasert, 0..100
    pub amp_hours: Vec<f64>,          // kumulativ Ah brukt
    pub remaining_ah: Vec<f64>,       // total - kumulativ
    pub remaining_pct: Option<Vec<f64>>, // kun med oppgitt kapasitet
    pub remaining_rated_ah: Option<Vec<f64>>, // oppgitt kapasitet - kumulativ
    pub scaled_voltage: Option<Vec<f64>>,     // min-max skalert til 0..1

    // --- glattet (Valid-modus, kanter allerede borte) ---
    pub smoothing_window: usize,
    pub smoothed_elapsed_s: Vec<f64>, // midtpunkt-tid for hvert vindu
    pub smoothed_voltage_v: Vec<f64>,
    pub smoothed_current_a: Vec<f64>,
    /// trapes-Ah fra glattet strøm, én verdi per intervall
    pub smoothed_amp_hours: Vec<f64>,

    pub summary: DischargeSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DischargeSummary {
    pub sample_count: usize,
    pub discharge_time_s: f64,
    pub discharge_time_h: f64, // 2 dp
    pub final_voltage_v: f64,  // 3 dp
    pub min_voltage_v: f64,
    pub max_voltage_v: f64,
    pub expected_ah: Option<f64>, // 2 dp, krever initial_voltage
    pub total_ah: f64,            // 3 dp
    pub total_wh: f64,            // 3 dp
    pub rated_capacity_ah: Option<f64>,
    pub remaining_pct_final: Option<f64>,
}

/// Resultat av én analyse. Tom økt er et normalt utfall, ikke en feil.
#[derive(Debug, Clone)]
pub enum Analysis {
    NoData,
    Curve(Box<DischargeCurve>),
}

impl Analysis {
    pub fn curve(&self) -> Option<&DischargeCurve> {
        match self {
            Analysis::Curve(c) => Some(c),
            Analysis::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Analysis::NoData)
    }
}

/// Én rad i batch-tabellen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatterySummary {
    pub battery: String,
    pub advertised_ah: Option<f64>,
    pub summary: DischargeSummary,
    /// Settes av batch-kjøringen, ikke av analysen
    pub analyzed_at: DateTime<Utc>,
}
