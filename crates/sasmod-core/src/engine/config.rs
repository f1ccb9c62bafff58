use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid q range: {0}")]
    InvalidQRange(String),

    #[error("Unknown q spacing '{0}' (expected 'linear' or 'log')")]
    UnknownSpacing(String),

    #[error("No q values to evaluate")]
    EmptyQValues,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QSpacing {
    Linear,
    #[default]
    Log,
}

impl FromStr for QSpacing {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "lin" => Ok(QSpacing::Linear),
            "log" | "logarithmic" => Ok(QSpacing::Log),
            _ => Err(ConfigError::UnknownSpacing(s.to_string())),
        }
    }
}

impl fmt::Display for QSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QSpacing::Linear => f.write_str("linear"),
            QSpacing::Log => f.write_str("log"),
        }
    }
}

/// Evenly spaced q values from `min` to `max` inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QGrid {
    min: f64,
    max: f64,
    points: usize,
    spacing: QSpacing,
}

impl QGrid {
    pub fn new(min: f64, max: f64, points: usize, spacing: QSpacing) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ConfigError::InvalidQRange(format!(
                "bounds must be finite, got [{}, {}]",
                min, max
            )));
        }
        if min > max {
            return Err(ConfigError::InvalidQRange(format!(
                "min {} exceeds max {}",
                min, max
            )));
        }
        if points == 0 {
            return Err(ConfigError::InvalidQRange(
                "at least one point is required".to_string(),
            ));
        }
        if spacing == QSpacing::Log && min <= 0.0 {
            return Err(ConfigError::InvalidQRange(format!(
                "log spacing requires min > 0, got {}",
                min
            )));
        }
        if points == 1 && min != max {
            return Err(ConfigError::InvalidQRange(format!(
                "a single point needs min == max, got [{}, {}]",
                min, max
            )));
        }
        Ok(Self {
            min,
            max,
            points,
            spacing,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn points(&self) -> usize {
        self.points
    }

    pub fn spacing(&self) -> QSpacing {
        self.spacing
    }

    /// Materialises the grid. Both end points are reproduced exactly.
    pub fn values(&self) -> Vec<f64> {
        if self.points == 1 {
            return vec![self.min];
        }
        let last = self.points - 1;
        let steps = last as f64;
        let mut values: Vec<f64> = match self.spacing {
            QSpacing::Linear => {
                let step = (self.max - self.min) / steps;
                (0..self.points)
                    .map(|i| self.min + step * i as f64)
                    .collect()
            }
            QSpacing::Log => {
                let (lo, hi) = (self.min.ln(), self.max.ln());
                let step = (hi - lo) / steps;
                (0..self.points)
                    .map(|i| (lo + step * i as f64).exp())
                    .collect()
            }
        };
        values[0] = self.min;
        values[last] = self.max;
        values
    }
}

/// Where the q values of an evaluation come from.
#[derive(Debug, Clone, PartialEq)]
pub enum QSource {
    Grid(QGrid),
    Values(Vec<f64>),
    /// First column of a CSV or text file.
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationConfig {
    pub model: String,
    /// Flat `name = value` TOML file applied before `overrides`.
    pub parameter_file: Option<PathBuf>,
    /// Parameter values in application order; later entries win.
    pub overrides: Vec<(String, f64)>,
    pub scale: f64,
    pub background: f64,
    pub q: QSource,
    /// Fixed `qy` for oriented evaluation; `q` then supplies `qx`.
    pub qy: Option<f64>,
}

#[derive(Default)]
pub struct EvaluationConfigBuilder {
    model: Option<String>,
    parameter_file: Option<PathBuf>,
    overrides: Vec<(String, f64)>,
    scale: Option<f64>,
    background: Option<f64>,
    q: Option<QSource>,
    qy: Option<f64>,
}

impl EvaluationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, name: impl Into<String>) -> Self {
        self.model = Some(name.into());
        self
    }
    pub fn parameter_file(mut self, path: PathBuf) -> Self {
        self.parameter_file = Some(path);
        self
    }
    pub fn parameter(mut self, name: impl Into<String>, value: f64) -> Self {
        self.overrides.push((name.into(), value));
        self
    }
    pub fn parameters<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.overrides
            .extend(values.into_iter().map(|(name, value)| (name.into(), value)));
        self
    }
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }
    pub fn background(mut self, background: f64) -> Self {
        self.background = Some(background);
        self
    }
    pub fn q_grid(mut self, grid: QGrid) -> Self {
        self.q = Some(QSource::Grid(grid));
        self
    }
    pub fn q_values(mut self, values: Vec<f64>) -> Self {
        self.q = Some(QSource::Values(values));
        self
    }
    pub fn q_file(mut self, path: PathBuf) -> Self {
        self.q = Some(QSource::File(path));
        self
    }
    pub fn qy(mut self, qy: f64) -> Self {
        self.qy = Some(qy);
        self
    }

    pub fn build(self) -> Result<EvaluationConfig, ConfigError> {
        let q = self.q.ok_or(ConfigError::MissingParameter("q"))?;
        if matches!(&q, QSource::Values(values) if values.is_empty()) {
            return Err(ConfigError::EmptyQValues);
        }
        Ok(EvaluationConfig {
            model: self.model.ok_or(ConfigError::MissingParameter("model"))?,
            parameter_file: self.parameter_file,
            overrides: self.overrides,
            scale: self.scale.unwrap_or(1.0),
            background: self.background.unwrap_or(0.0),
            q,
            qy: self.qy,
        })
    }
}
