//! Configuration Accumulator
//!
//! CRITICAL: `build` MUST run the presence check and then the compatibility
//! validator. There is no other way to obtain a [`Car`].
//!
//! A builder is a single-writer object. Share the built `Car`, not the builder.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

use crate::car::Car;
use crate::catalog::{
    Color, Engine, ExteriorFeature, InteriorFeature, Model, SafetyFeature, Transmission,
};
use crate::validation::{CompatibilityViolation, Selection, Validator};

/// Mandatory dimensions, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Model,
    Engine,
    Transmission,
}

impl RequiredField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredField::Model => "model",
            RequiredField::Engine => "engine",
            RequiredField::Transmission => "transmission",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{field} cannot be empty")]
    NullField { field: &'static str },

    #[error("Missing required fields: {}", join(.0))]
    MissingFields(Vec<RequiredField>),

    #[error("Invalid car configuration:\n- {}", join_lines(.0))]
    IncompatibleOptions(Vec<CompatibilityViolation>),
}

impl ConfigError {
    /// Stable machine-readable kind, used by the CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigError::NullField { .. } => "null_field",
            ConfigError::MissingFields(_) => "missing_fields",
            ConfigError::IncompatibleOptions(_) => "incompatible_options",
        }
    }
}

fn join(fields: &[RequiredField]) -> String {
    fields.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", ")
}

fn join_lines(violations: &[CompatibilityViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("\n- ")
}

/// JSON form of a candidate configuration.
///
/// Feature entries may be `null`; those surface as [`ConfigError::NullField`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigurationRequest {
    #[serde(default)]
    pub model: Option<Model>,
    #[serde(default)]
    pub engine: Option<Engine>,
    #[serde(default)]
    pub transmission: Option<Transmission>,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub interior: Vec<Option<InteriorFeature>>,
    #[serde(default)]
    pub exterior: Vec<Option<ExteriorFeature>>,
    #[serde(default)]
    pub safety: Vec<Option<SafetyFeature>>,
}

#[derive(Debug, Clone, Default)]
pub struct CarBuilder {
    model: Option<Model>,
    engine: Option<Engine>,
    transmission: Option<Transmission>,
    color: Color,
    interior_features: BTreeSet<InteriorFeature>,
    exterior_features: BTreeSet<ExteriorFeature>,
    safety_features: BTreeSet<SafetyFeature>,
}

fn require<T>(value: impl Into<Option<T>>, field: &'static str) -> Result<T, ConfigError> {
    value.into().ok_or(ConfigError::NullField { field })
}

impl CarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(
        &mut self,
        model: impl Into<Option<Model>>,
    ) -> Result<&mut Self, ConfigError> {
        self.model = Some(require(model, "model")?);
        Ok(self)
    }

    pub fn with_engine(
        &mut self,
        engine: impl Into<Option<Engine>>,
    ) -> Result<&mut Self, ConfigError> {
        self.engine = Some(require(engine, "engine")?);
        Ok(self)
    }

    pub fn with_transmission(
        &mut self,
        transmission: impl Into<Option<Transmission>>,
    ) -> Result<&mut Self, ConfigError> {
        self.transmission = Some(require(transmission, "transmission")?);
        Ok(self)
    }

    /// Defaults to [`Color::Black`] when never called.
    pub fn set_color(&mut self, color: impl Into<Option<Color>>) -> Result<&mut Self, ConfigError> {
        self.color = require(color, "color")?;
        Ok(self)
    }

    pub fn add_interior_feature(
        &mut self,
        feature: impl Into<Option<InteriorFeature>>,
    ) -> Result<&mut Self, ConfigError> {
        self.interior_features.insert(require(feature, "interior feature")?);
        Ok(self)
    }

    pub fn add_exterior_feature(
        &mut self,
        feature: impl Into<Option<ExteriorFeature>>,
    ) -> Result<&mut Self, ConfigError> {
        self.exterior_features.insert(require(feature, "exterior feature")?);
        Ok(self)
    }

    pub fn add_safety_feature(
        &mut self,
        feature: impl Into<Option<SafetyFeature>>,
    ) -> Result<&mut Self, ConfigError> {
        self.safety_features.insert(require(feature, "safety feature")?);
        Ok(self)
    }

    /// Adds each feature in order. Not transactional: entries before a
    /// failing one stay applied.
    pub fn add_interior_features<I>(&mut self, features: I) -> Result<&mut Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<Option<InteriorFeature>>,
    {
        for feature in features {
            self.add_interior_feature(feature)?;
        }
        Ok(self)
    }

    pub fn add_exterior_features<I>(&mut self, features: I) -> Result<&mut Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<Option<ExteriorFeature>>,
    {
        for feature in features {
            self.add_exterior_feature(feature)?;
        }
        Ok(self)
    }

    pub fn add_safety_features<I>(&mut self, features: I) -> Result<&mut Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<Option<SafetyFeature>>,
    {
        for feature in features {
            self.add_safety_feature(feature)?;
        }
        Ok(self)
    }

    pub fn with_sunroof(&mut self) -> &mut Self {
        self.exterior_features.insert(ExteriorFeature::Sunroof);
        self
    }

    pub fn with_rims(&mut self, sport_rims: bool) -> &mut Self {
        self.exterior_features.insert(if sport_rims {
            ExteriorFeature::SportRims
        } else {
            ExteriorFeature::StandardRims
        });
        self
    }

    /// Feed a JSON request through the ordinary setters.
    ///
    /// Absent mandatory fields are left unset so `build` reports them together.
    pub fn apply(&mut self, request: &ConfigurationRequest) -> Result<&mut Self, ConfigError> {
        if let Some(model) = request.model {
            self.with_model(model)?;
        }
        if let Some(engine) = request.engine {
            self.with_engine(engine)?;
        }
        if let Some(transmission) = request.transmission {
            self.with_transmission(transmission)?;
        }
        if let Some(color) = request.color {
            self.set_color(color)?;
        }
        self.add_interior_features(request.interior.iter().copied())?;
        self.add_exterior_features(request.exterior.iter().copied())?;
        self.add_safety_features(request.safety.iter().copied())?;
        Ok(self)
    }

    /// Validate and freeze. The builder is left untouched either way.
    pub fn build(&self) -> Result<Car, ConfigError> {
        let (model, engine, transmission) = self.required_fields()?;

        let selection = Selection {
            model,
            engine,
            transmission,
            interior: &self.interior_features,
            exterior: &self.exterior_features,
            safety: &self.safety_features,
        };

        let violations = Validator::new().validate(&selection);
        if !violations.is_empty() {
            tracing::warn!(
                model = model.key(),
                violations = violations.len(),
                "rejected incompatible configuration"
            );
            return Err(ConfigError::IncompatibleOptions(violations));
        }

        let car = Car::new(
            model,
            engine,
            transmission,
            self.color,
            self.interior_features.clone(),
            self.exterior_features.clone(),
            self.safety_features.clone(),
        );
        tracing::info!(car = %car, "configuration built");
        Ok(car)
    }

    fn required_fields(&self) -> Result<(Model, Engine, Transmission), ConfigError> {
        match (self.model, self.engine, self.transmission) {
            (Some(model), Some(engine), Some(transmission)) => Ok((model, engine, transmission)),
            (model, engine, transmission) => {
                let mut missing = vec![];
                if model.is_none() {
                    missing.push(RequiredField::Model);
                }
                if engine.is_none() {
                    missing.push(RequiredField::Engine);
                }
                if transmission.is_none() {
                    missing.push(RequiredField::Transmission);
                }
                tracing::warn!(missing = %join(&missing), "rejected incomplete configuration");
                Err(ConfigError::MissingFields(missing))
            }
        }
    }

    pub fn reset(&mut self) -> &mut Self {
        self.model = None;
        self.engine = None;
        self.transmission = None;
        self.color = Color::default();
        self.interior_features.clear();
        self.exterior_features.clear();
        self.safety_features.clear();
        self
    }
}
