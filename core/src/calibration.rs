// core/src/calibration.rs
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::CalibrationError;
use crate::models::TimeAnchor;

// ADC-referanse på Pico-loggeren
pub const VREF_DEFAULT: f64 = 3.3;
// 5:1 spenningsdeler foran ADC-en
pub const DIVIDER_RATIO_DEFAULT: f64 = 5.0;
// 4 x 5 Ω i parallell
pub const RESISTANCE_BANK_OHM: f64 = 1.25;
pub const RESISTANCE_SINGLE_OHM: f64 = 5.0;
pub const SAMPLE_INTERVAL_S: f64 = 1.0;
// 4S LiFePO4
pub const FULL_VOLTAGE_DEFAULT: f64 = 14.6;
pub const EMPTY_VOLTAGE_DEFAULT: f64 = 12.0;
pub const INITIAL_VOLTAGE_DEFAULT: f64 = 12.8;
pub const SMOOTHING_WINDOW_DEFAULT: usize = 21;

/// Faste fysiske konstanter for én testrigg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// avlesning (0..1) → volt, typisk Vref * deler-forhold
    pub voltage_scale: f64,
    /// last (eller parallell-ekvivalent) i ohm
    pub resistance_ohm: f64,
    /// nominelt sample-intervall (sek)
    pub sample_interval_s: f64,
    pub full_voltage: f64,
    pub empty_voltage: f64,
    /// oppgitt kapasitet (Ah); None => ingen %-igjen-serie
    pub rated_capacity_ah: Option<f64>,
    /// antatt startspenning for "forventet Ah"
    pub initial_voltage: Option<f64>,
}

impl Default for Calibration {
    fn default() -> Self {
        Self::parallel_bank()
    }
}

impl Calibration {
    /// Rigg med fire 5 Ω motstander i parallell (1.25 Ω).
    pub fn parallel_bank() -> Self {
        Self {
            voltage_scale: VREF_DEFAULT * DIVIDER_RATIO_DEFAULT,
            resistance_ohm: RESISTANCE_BANK_OHM,
            sample_interval_s: SAMPLE_INTERVAL_S,
            full_voltage: FULL_VOLTAGE_DEFAULT,
            empty_voltage: EMPTY_VOLTAGE_DEFAULT,
            rated_capacity_ah: None,
            initial_voltage: Some(INITIAL_VOLTAGE_DEFAULT),
        }
    }

    /// Eldre rigg: én 5 Ω last.
    pub fn single_load() -> Self {
        Self {
            resistance_ohm: RESISTANCE_SINGLE_OHM,
            ..Self::parallel_bank()
        }
    }

    /// Skala fra ADC-referanse og spenningsdeler R1 (øvre) / R2 (nedre).
    pub fn from_divider(vref: f64, r1_ohm: f64, r2_ohm: f64) -> Result<Self, CalibrationError> {
        check_positive("vref", vref)?;
        check_positive("r1_ohm", r1_ohm)?;
        check_positive("r2_ohm", r2_ohm)?;
        let cal = Self {
            voltage_scale: vref * (r1_ohm + r2_ohm) / r2_ohm,
            ..Self::parallel_bank()
        };
        cal.validate()?;
        Ok(cal)
    }

    pub fn with_rated_capacity(mut self, rated_ah: f64) -> Self {
        self.rated_capacity_ah = Some(rated_ah);
        self
    }

    pub fn with_resistance(mut self, resistance_ohm: f64) -> Self {
        self.resistance_ohm = resistance_ohm;
        self
    }

    pub fn with_thresholds(mut self, full_voltage: f64, empty_voltage: f64) -> Self {
        self.full_voltage = full_voltage;
        self.empty_voltage = empty_voltage;
        self
    }

    /// Avvis ugyldige konstanter før noe regnes ut.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        check_positive("voltage_scale", self.voltage_scale)?;
        check_positive("resistance_ohm", self.resistance_ohm)?;
        check_positive("sample_interval_s", self.sample_interval_s)?;
        check_finite("full_voltage", self.full_voltage)?;
        check_finite("empty_voltage", self.empty_voltage)?;
        if self.full_voltage <= self.empty_voltage {
            return Err(CalibrationError::InvertedThresholds {
                full: self.full_voltage,
                empty: self.empty_voltage,
            });
        }
        if let Some(rated) = self.rated_capacity_ah {
            check_positive("rated_capacity_ah", rated)?;
        }
        if let Some(v0) = self.initial_voltage {
            check_finite("initial_voltage", v0)?;
        }
        Ok(())
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), CalibrationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalibrationError::NonFinite { field })
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), CalibrationError> {
    check_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(CalibrationError::NonPositive { field, value })
    }
}

/// Hele konfigurasjonsfila (dischargegraph.json).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub calibration: Calibration,
    pub anchor: TimeAnchor,
    pub smoothing_window: usize,
    /// batteri-etikett ("battery3") → oppgitt Ah
    pub advertised_ah: BTreeMap<String, f64>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            calibration: Calibration::default(),
            anchor: TimeAnchor::First,
            smoothing_window: SMOOTHING_WINDOW_DEFAULT,
            advertised_ah: BTreeMap::new(),
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<(), CalibrationError> {
        self.calibration.validate()?;
        for (battery, &value) in &self.advertised_ah {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalibrationError::AdvertisedCapacity {
                    battery: battery.clone(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Kalibrering for ett batteri: oppgitt Ah fra tabellen overstyrer basen.
    pub fn calibration_for(&self, battery: &str) -> Calibration {
        match self.advertised_ah.get(battery) {
            Some(&ah) => self.calibration.clone().with_rated_capacity(ah),
            None => self.calibration.clone(),
        }
    }
}
