//! Benchmark configuration.
//!
//! A [`BenchConfig`] replaces the fixed constants of a one-shot benchmark
//! script: the problem sizes to sweep, where the results table and chart are
//! written, and the floating-point precision shared by both distance
//! computers. Every field has a default, so an empty JSON object is a valid
//! configuration file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Problem sizes swept when none are configured.
pub const DEFAULT_SIZES: [usize; 5] = [200, 400, 600, 800, 1000];

/// Default path of the comma-separated results table.
pub const DEFAULT_TABLE_PATH: &str = "performance_results.csv";

/// Default path of the comparison chart.
pub const DEFAULT_PLOT_PATH: &str = "performance_comparison.png";

/// Floating-point width used by both distance computers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// 32-bit floats.
    F32,
    /// 64-bit floats.
    F64,
}

impl Default for Precision {
    fn default() -> Self {
        Self::F32
    }
}

impl Precision {
    /// Size in bytes of one coordinate or distance value.
    #[inline]
    pub fn byte_width(&self) -> usize {
        match self {
            Precision::F32 => 4,
            Precision::F64 => 8,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::F32 => f.write_str("f32"),
            Precision::F64 => f.write_str("f64"),
        }
    }
}

impl FromStr for Precision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "f32" | "float32" | "single" => Ok(Precision::F32),
            "f64" | "float64" | "double" => Ok(Precision::F64),
            other => Err(Error::InvalidConfig(format!(
                "unknown precision '{}', expected f32 or f64",
                other
            ))),
        }
    }
}

/// Configuration for one benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Problem sizes, measured in this order.
    pub sizes: Vec<usize>,
    /// Destination of the CSV results table.
    pub table_path: PathBuf,
    /// Destination of the PNG chart.
    pub plot_path: PathBuf,
    /// Float width shared by the baseline and optimized computers.
    pub precision: Precision,
    /// Seed for point generation. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// TrueType font used for chart text. `None` probes system locations.
    pub font_path: Option<PathBuf>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            table_path: PathBuf::from(DEFAULT_TABLE_PATH),
            plot_path: PathBuf::from(DEFAULT_PLOT_PATH),
            precision: Precision::default(),
            seed: None,
            font_path: None,
        }
    }
}

impl BenchConfig {
    /// Creates a config with the default sizes and output paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::IoError(format!("read {} failed: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    /// Parses a config from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Sets the problem sizes. Chainable.
    pub fn with_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.sizes = sizes;
        self
    }

    /// Sets the results table path. Chainable.
    pub fn with_table_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.table_path = path.into();
        self
    }

    /// Sets the chart path. Chainable.
    pub fn with_plot_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.plot_path = path.into();
        self
    }

    /// Sets the shared precision. Chainable.
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the RNG seed. Chainable.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the chart font. Chainable.
    pub fn with_font_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.font_path = Some(path.into());
        self
    }

    /// Checks that the size list is non-empty and every size is positive.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(Error::InvalidConfig("sizes must not be empty".into()));
        }
        if let Some(pos) = self.sizes.iter().position(|&n| n == 0) {
            return Err(Error::InvalidConfig(format!(
                "sizes[{}] is zero, sizes must be positive",
                pos
            )));
        }
        Ok(())
    }
}
