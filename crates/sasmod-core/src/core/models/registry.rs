use super::info::ModelInfo;
use super::{
    be_polyelectrolyte, core_shell_cylinder, core_shell_sphere, correlation_length, guinier,
    hardsphere, vesicle,
};
use crate::core::params::ParameterError;
use phf::{Map, phf_map};
use std::collections::HashMap;
use thiserror::Error;

/// Model names used by older analysis packages, mapped to registered names.
pub static LEGACY_NAMES: Map<&'static str, &'static str> = phf_map! {
    "HardsphereStructure" => "hardsphere",
    "hardsphere_fish" => "hardsphere",
    "CoreShellCylinderModel" => "core_shell_cylinder",
    "CoreShellModel" => "core_shell_sphere",
    "VesicleModel" => "vesicle",
    "GuinierModel" => "guinier",
    "CorrLengthModel" => "correlation_length",
};

/// Every model compiled into the library.
pub fn builtin_models() -> Result<Vec<ModelInfo>, ParameterError> {
    Ok(vec![
        hardsphere::model_info()?,
        core_shell_cylinder::model_info()?,
        core_shell_sphere::model_info()?,
        vesicle::model_info()?,
        guinier::model_info()?,
        correlation_length::model_info()?,
        be_polyelectrolyte::model_info()?,
    ])
}

#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    registry: HashMap<String, ModelInfo>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for info in builtin_models()? {
            registry.register(info)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, info: ModelInfo) -> Result<(), RegistryError> {
        if self.registry.contains_key(&info.name) {
            return Err(RegistryError::Duplicate(info.name));
        }
        self.registry.insert(info.name.clone(), info);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ModelInfo> {
        self.registry.get(name)
    }

    /// Looks a model up by its registered name or a legacy alias.
    pub fn resolve(&self, name: &str) -> Result<&ModelInfo, RegistryError> {
        self.get(name)
            .or_else(|| LEGACY_NAMES.get(name).and_then(|canonical| self.get(canonical)))
            .ok_or_else(|| RegistryError::Unknown(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.registry.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Models ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &ModelInfo> {
        let mut models: Vec<&ModelInfo> = self.registry.values().collect();
        models.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        models.into_iter()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Model '{0}' is already registered")]
    Duplicate(String),
    #[error("Unknown model '{0}'")]
    Unknown(String),
    #[error("Invalid built-in model definition: {0}")]
    Parameter(#[from] ParameterError),
}
