use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::calibration::AnalyzerConfig;
use crate::errors::StorageError;
use crate::logfile::parse_session;
use crate::models::Session;
use crate::telemetry;

pub const DEFAULT_CONFIG_PATH: &str = "dischargegraph.json";
pub const LOG_PREFIX: &str = "battery";
pub const LOG_SUFFIX: &str = "_out.text";

/// Leser inn config fra disk (JSON).
/// Hvis filen ikke finnes, returneres default-config.
pub fn load_config(path: impl AsRef<Path>) -> Result<AnalyzerConfig, StorageError> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!(
                "⚠️ Fant ikke config på {}, bruker default-kalibrering",
                path.display()
            );
            return Ok(AnalyzerConfig::default());
        }
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let de = &mut serde_json::Deserializer::from_str(&contents);
    let cfg: AnalyzerConfig =
        serde_path_to_error::deserialize(de).map_err(|source| StorageError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    cfg.validate()?;

    log::info!(
        "📂 Config lastet fra {} (R={} Ω, skala={})",
        path.display(),
        cfg.calibration.resistance_ohm,
        cfg.calibration.voltage_scale
    );
    Ok(cfg)
}

/// Lagrer config til disk som JSON (pretty-print). Ugyldig config skrives ikke.
pub fn save_config(cfg: &AnalyzerConfig, path: impl AsRef<Path>) -> Result<(), StorageError> {
    let path = path.as_ref();
    cfg.validate()?;
    let json = serde_json::to_string_pretty(cfg)?;
    fs::write(path, json).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("✅ Config lagret til {}", path.display());
    Ok(())
}

/// Leser én loggfil. Manglende fil => Ok(None) (normal "ingen data").
/// Ugyldig UTF-8 behandles som ødelagte linjer, ikke som feil.
pub fn read_session_file(path: impl AsRef<Path>) -> Result<Option<Session>, StorageError> {
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("{} not found. Skipping...", path.display());
            return Ok(None);
        }
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let text = String::from_utf8_lossy(&bytes);
    let session = parse_session(&text);
    telemetry::LINES_SKIPPED.inc_by(session.skipped_lines as u64);
    telemetry::SAMPLES_ACCEPTED.inc_by(session.samples.len() as u64);
    Ok(Some(session))
}

/// Finn `battery*_out.text` i katalogen, sortert på navn.
pub fn discover_logs(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, StorageError> {
    let dir = dir.as_ref();
    let io_err = |source| StorageError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut out = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_log = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with(LOG_PREFIX) && n.ends_with(LOG_SUFFIX))
            .unwrap_or(false);
        if is_log && path.is_file() {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

/// "battery3_out.text" → "battery3"
pub fn battery_label(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.split_once('_') {
        Some((label, _)) => label.to_string(),
        None => name,
    }
}
