//! System file I/O
//!
//! Linear systems can be stored as JSON or TOML. The format is detected
//! from the file extension.
//!
//! ```json
//! {
//!   "description": "2x2 regular system",
//!   "matrix": [[2.0, 1.0], [1.0, 3.0]],
//!   "rhs": [5.0, 10.0],
//!   "solver": { "pivoting": "largest_magnitude" }
//! }
//! ```

use crate::dense::matrix_from_rows;
use crate::direct::SolverConfig;
use crate::error::GaussError;
use ndarray::{Array1, Array2};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A linear system `Ax = b` as stored on disk
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SystemFile {
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Coefficient matrix, one inner list per equation
    pub matrix: Vec<Vec<f64>>,
    /// Right-hand side, one value per equation
    pub rhs: Vec<f64>,
    /// Solver settings
    #[serde(default)]
    pub solver: SolverConfig,
}

impl SystemFile {
    /// Create a system with default solver settings
    pub fn new(matrix: Vec<Vec<f64>>, rhs: Vec<f64>) -> Self {
        Self {
            description: String::new(),
            matrix,
            rhs,
            solver: SolverConfig::default(),
        }
    }

    /// Convert to dense arrays, rejecting ragged or mismatched input
    pub fn to_arrays(&self) -> Result<(Array2<f64>, Array1<f64>), ConfigError> {
        let a = matrix_from_rows(&self.matrix)?;
        if self.rhs.len() != a.nrows() {
            return Err(GaussError::DimensionMismatch {
                expected: a.nrows(),
                got: self.rhs.len(),
            }
            .into());
        }
        Ok((a, Array1::from(self.rhs.clone())))
    }
}

/// System file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format
    Json,
    /// TOML format
    Toml,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        match ext.to_lowercase().as_str() {
            "json" => Some(ConfigFormat::Json),
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }
}

/// Load a system from a file
///
/// Format is auto-detected from file extension (.json or .toml)
pub fn load_system<P: AsRef<Path>>(path: P) -> Result<SystemFile, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;
    let content = fs::read_to_string(path)?;

    log::debug!("loading system from {}", path.display());
    parse_system(&content, format)
}

/// Parse a system from a string
pub fn parse_system(content: &str, format: ConfigFormat) -> Result<SystemFile, ConfigError> {
    match format {
        ConfigFormat::Json => {
            serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
        }
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
        }
    }
}

/// System file error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Matrix and right-hand side do not form a valid system
    #[error("Invalid system: {0}")]
    InvalidSystem(#[from] GaussError),
}
