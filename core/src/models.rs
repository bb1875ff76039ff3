use serde::{Deserialize, Serialize};

/// Én linje fra loggeren: tid + normalisert ADC-avlesning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub t: f64,       // sek (loggerens klokke)
    pub reading: f64, // 0..1, skaleres til volt via Calibration
}

impl Sample {
    pub fn new(t: f64, reading: f64) -> Self {
        Self { t, reading }
    }

    /// 0.0 betyr "sensor frakoblet / test ferdig", ikke 0 V.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.reading == 0.0
    }
}

/// En batteri-økt etter parsing: avkortet ved første sentinel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub samples: Vec<Sample>,
    /// Antall linjer som ble hoppet over (feil antall felt, ikke-tall)
    pub skipped_lines: usize,
    /// Linjenummer (0-basert) der sentinel stoppet lesingen
    pub sentinel_line: Option<usize>,
}

impl Session {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }
}

/// Hvilket sample som får t = 0 etter normalisering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeAnchor {
    /// Første sample = 0, tiden teller oppover
    #[default]
    First,
    /// Siste sample = 0, alle tider er negative (tid før utladning var ferdig)
    Last,
}

/// Konvolusjonsmodus for glidende snitt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SmoothMode {
    /// Kun fulle vinduer: lengde n - (w - 1)
    #[default]
    Valid,
    /// Samme lengde som input, null-paddede kanter (må trimmes med w/2)
    Same,
}
