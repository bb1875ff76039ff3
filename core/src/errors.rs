use std::path::PathBuf;

use thiserror::Error;

/// Ugyldig kalibrering – avvises før noen beregning starter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    #[error("{field} må være > 0 (fikk {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} må være et endelig tall")]
    NonFinite { field: &'static str },

    #[error("full_voltage ({full}) må være større enn empty_voltage ({empty})")]
    InvertedThresholds { full: f64, empty: f64 },

    #[error("advertised_ah for {battery} må være > 0 (fikk {value})")]
    AdvertisedCapacity { battery: String, value: f64 },
}

/// Feil fra disk-laget (config + loggfiler).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O-feil for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ugyldig JSON i {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_path_to_error::Error<serde_json::Error>,
    },

    #[error("kunne ikke serialisere config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

/// Feil fra JSON-inngangen (analyzer / Python).
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("ugyldig input ved {path}: {message}")]
    Input { path: String, message: String },

    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    #[error("serialisering feilet: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl AnalyzerError {
    pub(crate) fn from_path_error(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        AnalyzerError::Input {
            path: err.path().to_string(),
            message: err.into_inner().to_string(),
        }
    }
}
