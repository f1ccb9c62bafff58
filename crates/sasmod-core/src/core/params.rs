use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Classifies how a parameter participates in the model evaluation.
///
/// The class decides which kernel functions receive the parameter besides
/// the intensity kernels: volume parameters are also bound (in table order)
/// to the form-volume, effective-radius and volume-ratio helpers, while
/// orientation parameters only matter for the oriented `(qx, qy)` kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParameterKind {
    /// Ordinary scalar parameter.
    #[default]
    Plain,
    /// Geometric parameter that determines the particle volume.
    Volume,
    /// Angular parameter describing the particle orientation (degrees).
    Orientation,
    /// Scattering length density.
    Sld,
    /// Magnetic parameter.
    Magnetic,
}

impl FromStr for ParameterKind {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "plain" => Ok(ParameterKind::Plain),
            "volume" => Ok(ParameterKind::Volume),
            "orientation" => Ok(ParameterKind::Orientation),
            "sld" => Ok(ParameterKind::Sld),
            "magnetic" => Ok(ParameterKind::Magnetic),
            other => Err(ParameterError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParameterKind::Plain => "",
            ParameterKind::Volume => "volume",
            ParameterKind::Orientation => "orientation",
            ParameterKind::Sld => "sld",
            ParameterKind::Magnetic => "magnetic",
        };
        f.write_str(s)
    }
}

/// Closed interval of admissible values; either end may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub const UNBOUNDED: Bounds = Bounds::new(f64::NEG_INFINITY, f64::INFINITY);
    pub const NON_NEGATIVE: Bounds = Bounds::new(0.0, f64::INFINITY);

    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// NaN is never contained.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

/// A named, bounded scalar parameter of a scattering model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParameter {
    /// Identifier used to bind values by name (e.g. "effect_radius").
    pub name: String,
    /// Physical unit, empty for dimensionless quantities (e.g. "Ang").
    pub units: String,
    pub default: f64,
    pub bounds: Bounds,
    pub kind: ParameterKind,
    /// Human-readable description.
    pub description: String,
}

impl ModelParameter {
    pub fn new(
        name: &str,
        units: &str,
        default: f64,
        bounds: Bounds,
        kind: ParameterKind,
        description: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            units: units.to_string(),
            default,
            bounds,
            kind,
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Duplicate parameter name: '{0}'")]
    Duplicate(String),

    #[error("Unknown parameter: '{0}'")]
    Unknown(String),

    #[error("Unknown parameter class: '{0}'")]
    UnknownKind(String),

    #[error("Invalid bounds for parameter '{name}': {bounds}")]
    InvalidBounds { name: String, bounds: Bounds },

    #[error("Default value {default} of parameter '{name}' lies outside its bounds {bounds}")]
    DefaultOutOfBounds {
        name: String,
        default: f64,
        bounds: Bounds,
    },

    #[error("Value {value} for parameter '{name}' lies outside its bounds {bounds}")]
    OutOfBounds {
        name: String,
        value: f64,
        bounds: Bounds,
    },
}

/// Ordered parameter table of a model.
///
/// The order is significant: kernels receive parameter values as a slice in
/// exactly this order, so the table is immutable once built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterTable {
    parameters: Vec<ModelParameter>,
}

impl ParameterTable {
    pub fn new(parameters: Vec<ModelParameter>) -> Result<Self, ParameterError> {
        let mut seen = HashSet::with_capacity(parameters.len());
        for p in &parameters {
            if !seen.insert(p.name.as_str()) {
                return Err(ParameterError::Duplicate(p.name.clone()));
            }
            let (lower, upper) = (p.bounds.lower, p.bounds.upper);
            if lower.is_nan() || upper.is_nan() || lower > upper {
                return Err(ParameterError::InvalidBounds {
                    name: p.name.clone(),
                    bounds: p.bounds,
                });
            }
            if !p.bounds.contains(p.default) {
                return Err(ParameterError::DefaultOutOfBounds {
                    name: p.name.clone(),
                    default: p.default,
                    bounds: p.bounds,
                });
            }
        }
        Ok(Self { parameters })
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelParameter> {
        self.parameters.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ModelParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name == name)
    }

    pub fn defaults(&self) -> Vec<f64> {
        self.parameters.iter().map(|p| p.default).collect()
    }

    /// Positions of the volume-class parameters, in table order.
    pub fn volume_indices(&self) -> Vec<usize> {
        self.parameters
            .iter()
            .enumerate()
            .filter(|(_, p)| p.kind == ParameterKind::Volume)
            .map(|(i, _)| i)
            .collect()
    }

    /// Picks the volume-class values out of a full value slice.
    pub fn volume_values(&self, values: &[f64]) -> Vec<f64> {
        self.parameters
            .iter()
            .zip(values)
            .filter(|(p, _)| p.kind == ParameterKind::Volume)
            .map(|(_, &v)| v)
            .collect()
    }

    pub fn has_orientation(&self) -> bool {
        self.parameters
            .iter()
            .any(|p| p.kind == ParameterKind::Orientation)
    }

    pub fn bind(&self) -> ParameterSet<'_> {
        ParameterSet::new(self)
    }
}

/// Concrete values bound to a [`ParameterTable`], initialised from its defaults.
///
/// Bounds are enforced here rather than inside the kernels, which accept any
/// real input.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet<'a> {
    table: &'a ParameterTable,
    values: Vec<f64>,
}

impl<'a> ParameterSet<'a> {
    pub fn new(table: &'a ParameterTable) -> Self {
        Self {
            table,
            values: table.defaults(),
        }
    }

    pub fn table(&self) -> &'a ParameterTable {
        self.table
    }

    pub fn set(&mut self, name: &str, value: f64) -> Result<(), ParameterError> {
        let index = self
            .table
            .index_of(name)
            .ok_or_else(|| ParameterError::Unknown(name.to_string()))?;
        let bounds = self.table.parameters[index].bounds;
        if !bounds.contains(value) {
            return Err(ParameterError::OutOfBounds {
                name: name.to_string(),
                value,
                bounds,
            });
        }
        self.values[index] = value;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.table.index_of(name).map(|i| self.values[i])
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn volume_values(&self) -> Vec<f64> {
        self.table.volume_values(&self.values)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.table
            .iter()
            .zip(&self.values)
            .map(|(p, &v)| (p.name.as_str(), v))
    }

    /// Applies overrides in order; stops at the first rejected value.
    pub fn apply_overrides<'b, I>(&mut self, overrides: I) -> Result<(), ParameterError>
    where
        I: IntoIterator<Item = (&'b str, f64)>,
    {
        for (name, value) in overrides {
            self.set(name, value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Reads a flat `name = value` TOML document of parameter values.
pub fn load_parameter_file(path: &Path) -> Result<BTreeMap<String, f64>, ParamLoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ParamLoadError::Toml {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}
