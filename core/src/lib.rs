pub mod analyze_session;
pub mod analyzer;
pub mod calibration;
pub mod cli;
pub mod errors;
pub mod logfile;
pub mod metrics;
pub mod models;
pub mod physics;
pub mod smoothing;
pub mod storage;
pub mod telemetry;
pub mod types;

#[cfg(feature = "python")]
mod py;

pub use analyze_session::{analyze_session, AnalyzeInputs};
pub use analyzer::analyze_session_json;
pub use calibration::{AnalyzerConfig, Calibration};
pub use errors::{AnalyzerError, CalibrationError, StorageError};
pub use logfile::{parse_line, parse_session, truncate_at_sentinel};
pub use models::{Sample, Session, SmoothMode, TimeAnchor};
pub use physics::{
    battery_percentage, cumulative_amp_hours, cumulative_amp_hours_trapezoid,
    remaining_capacity_percent, to_current, to_voltage,
};
pub use smoothing::smooth;
pub use storage::{load_config, read_session_file, save_config};
pub use types::{Analysis, BatterySummary, DischargeCurve, DischargeSummary};
