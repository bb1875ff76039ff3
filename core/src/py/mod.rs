// Python-binding for plotteskriptene (matplotlib ligger utenfor crate-en).
// Bygges kun med `--features python`.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::errors::AnalyzerError;

fn to_py_err(e: AnalyzerError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// analyze_session_json(samples_json, config_json=None) -> str
#[pyfunction]
#[pyo3(signature = (samples_json, config_json=None))]
fn analyze_session_json(samples_json: &str, config_json: Option<&str>) -> PyResult<String> {
    crate::analyzer::analyze_session_json(samples_json, config_json).map_err(to_py_err)
}

/// battery_percentage(voltage, full_v, empty_v) -> int
#[pyfunction]
fn battery_percentage(voltage: f64, full_v: f64, empty_v: f64) -> PyResult<u8> {
    if !(full_v > empty_v) {
        return Err(PyValueError::new_err(
            "full_v må være større enn empty_v",
        ));
    }
    Ok(crate::physics::battery_percentage(voltage, full_v, empty_v))
}

#[pymodule]
fn dischargegraph_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(analyze_session_json, m)?)?;
    m.add_function(wrap_pyfunction!(battery_percentage, m)?)?;
    Ok(())
}
