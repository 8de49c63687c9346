//! Staged Construction Protocol
//!
//! `Wizard::select_model` → `EngineStep::select_engine` →
//! `TransmissionStep::select_transmission` → `OptionsStep`. Each step is a
//! separate type, so optional setters and `build` do not exist until the
//! three mandatory selections have been made in order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::builder::{CarBuilder, ConfigError};
use crate::car::Car;
use crate::catalog::{
    Color, Engine, ExteriorFeature, InteriorFeature, Model, SafetyFeature, Transmission,
};

/// Canned configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Sedan, V6, automatic, ABS
    Basic,
    /// SUV with every interior, exterior and safety option
    Luxury,
    /// Sports car with performance options
    Sports,
}

impl Preset {
    pub const ALL: &'static [Preset] = &[Preset::Basic, Preset::Luxury, Preset::Sports];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Basic => "basic",
            Preset::Luxury => "luxury",
            Preset::Sports => "sports",
        }
    }

    pub fn parse(s: &str) -> Option<Preset> {
        match s.trim().to_lowercase().as_str() {
            "basic" | "sedan" | "basic-sedan" | "basic_sedan" => Some(Preset::Basic),
            "luxury" | "suv" | "luxury-suv" | "luxury_suv" => Some(Preset::Luxury),
            "sports" | "sport" | "sports-car" | "sports_car" => Some(Preset::Sports),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Preset::Basic => "Sedan with V6, automatic transmission and ABS",
            Preset::Luxury => "Fully loaded SUV with V8 and every available option",
            Preset::Sports => "Sports car with V8, manual transmission and performance options",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown preset '{0}'. Available: basic, luxury, sports")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::parse(s).ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

/// Owns one builder and hands out step objects that borrow it.
///
/// Steps must come in order. Optional setters and `build` only exist on the
/// last step:
///
/// ```
/// use carconfig_core::{Color, ConfigError, Engine, Model, Transmission, Wizard};
///
/// fn staged() -> Result<(), ConfigError> {
///     let mut wizard = Wizard::new();
///     let car = wizard
///         .select_model(Model::Sedan)?
///         .select_engine(Engine::V6)?
///         .select_transmission(Transmission::Automatic)?
///         .set_color(Color::Red)?
///         .build()?;
///     assert_eq!(car.color(), Color::Red);
///     Ok(())
/// }
/// staged().unwrap();
/// ```
///
/// `build` is not reachable from the wizard itself:
///
/// ```compile_fail
/// use carconfig_core::Wizard;
///
/// let mut wizard = Wizard::new();
/// let _ = wizard.build();
/// ```
///
/// The engine cannot be chosen before the model:
///
/// ```compile_fail
/// use carconfig_core::{Engine, Wizard};
///
/// let mut wizard = Wizard::new();
/// let _ = wizard.select_engine(Engine::V6);
/// ```
///
/// Optional setters are not reachable before the transmission:
///
/// ```compile_fail
/// use carconfig_core::{Color, ConfigError, Engine, Model, Wizard};
///
/// fn skip_transmission() -> Result<(), ConfigError> {
///     let mut wizard = Wizard::new();
///     let _ = wizard
///         .select_model(Model::Sedan)?
///         .select_engine(Engine::V6)?
///         .set_color(Color::Red)?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Default)]
pub struct Wizard {
    builder: CarBuilder,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a caller-supplied builder. Anything already staged on it is kept.
    pub fn with_builder(builder: CarBuilder) -> Self {
        Self { builder }
    }

    /// Discard everything staged so far.
    pub fn restart(&mut self) -> &mut Self {
        self.builder.reset();
        self
    }

    /// Step 1. Earlier optional selections on the builder stay staged.
    pub fn select_model(
        &mut self,
        model: impl Into<Option<Model>>,
    ) -> Result<EngineStep<'_>, ConfigError> {
        self.builder.with_model(model)?;
        Ok(EngineStep { builder: &mut self.builder })
    }

    pub fn build_preset(&mut self, preset: Preset, color: Color) -> Result<Car, ConfigError> {
        tracing::debug!(preset = preset.as_str(), color = color.key(), "building preset");
        match preset {
            Preset::Basic => self.build_basic_sedan(color),
            Preset::Luxury => self.build_luxury_suv(color),
            Preset::Sports => self.build_sports_car(color),
        }
    }

    pub fn build_basic_sedan(&mut self, color: Color) -> Result<Car, ConfigError> {
        self.builder
            .reset()
            .with_model(Model::Sedan)?
            .with_engine(Engine::V6)?
            .with_transmission(Transmission::Automatic)?
            .set_color(color)?
            .add_safety_feature(SafetyFeature::Abs)?
            .build()
    }

    pub fn build_luxury_suv(&mut self, color: Color) -> Result<Car, ConfigError> {
        self.builder
            .reset()
            .with_model(Model::Suv)?
            .with_engine(Engine::V8)?
            .with_transmission(Transmission::Automatic)?
            .set_color(color)?
            .add_interior_features([
                InteriorFeature::Leather,
                InteriorFeature::Gps,
                InteriorFeature::SoundSystem,
            ])?
            .add_exterior_features([ExteriorFeature::Sunroof, ExteriorFeature::SportRims])?
            .add_safety_features([
                SafetyFeature::Abs,
                SafetyFeature::Airbags,
                SafetyFeature::RearCamera,
            ])?
            .build()
    }

    pub fn build_sports_car(&mut self, color: Color) -> Result<Car, ConfigError> {
        self.builder
            .reset()
            .with_model(Model::Sports)?
            .with_engine(Engine::V8)?
            .with_transmission(Transmission::Manual)?
            .set_color(color)?
            .add_interior_features([InteriorFeature::Leather, InteriorFeature::SoundSystem])?
            .add_exterior_feature(ExteriorFeature::SportRims)?
            .add_safety_features([SafetyFeature::Abs, SafetyFeature::Airbags])?
            .build()
    }
}

impl From<CarBuilder> for Wizard {
    fn from(builder: CarBuilder) -> Self {
        Self::with_builder(builder)
    }
}

#[must_use = "the engine must be selected before anything else"]
pub struct EngineStep<'a> {
    builder: &'a mut CarBuilder,
}

impl<'a> EngineStep<'a> {
    pub fn select_engine(
        self,
        engine: impl Into<Option<Engine>>,
    ) -> Result<TransmissionStep<'a>, ConfigError> {
        self.builder.with_engine(engine)?;
        Ok(TransmissionStep { builder: self.builder })
    }
}

#[must_use = "the transmission must be selected before anything else"]
pub struct TransmissionStep<'a> {
    builder: &'a mut CarBuilder,
}

impl<'a> TransmissionStep<'a> {
    pub fn select_transmission(
        self,
        transmission: impl Into<Option<Transmission>>,
    ) -> Result<OptionsStep<'a>, ConfigError> {
        self.builder.with_transmission(transmission)?;
        Ok(OptionsStep { builder: self.builder })
    }
}

/// Open stage: any optional call, any order, any number of times.
#[must_use = "call build() to obtain the car"]
pub struct OptionsStep<'a> {
    builder: &'a mut CarBuilder,
}

impl<'a> OptionsStep<'a> {
    pub fn set_color(self, color: impl Into<Option<Color>>) -> Result<Self, ConfigError> {
        self.builder.set_color(color)?;
        Ok(self)
    }

    pub fn add_interior_feature(
        self,
        feature: impl Into<Option<InteriorFeature>>,
    ) -> Result<Self, ConfigError> {
        self.builder.add_interior_feature(feature)?;
        Ok(self)
    }

    pub fn add_exterior_feature(
        self,
        feature: impl Into<Option<ExteriorFeature>>,
    ) -> Result<Self, ConfigError> {
        self.builder.add_exterior_feature(feature)?;
        Ok(self)
    }

    pub fn add_safety_feature(
        self,
        feature: impl Into<Option<SafetyFeature>>,
    ) -> Result<Self, ConfigError> {
        self.builder.add_safety_feature(feature)?;
        Ok(self)
    }

    pub fn with_sunroof(self) -> Self {
        self.builder.with_sunroof();
        self
    }

    pub fn build(self) -> Result<Car, ConfigError> {
        self.builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staged_flow_builds_car() {
        let mut wizard = Wizard::new();
        let car = wizard
            .select_model(Model::Suv)
            .unwrap()
            .select_engine(Engine::V8)
            .unwrap()
            .select_transmission(Transmission::Manual)
            .unwrap()
            .set_color(Color::Green)
            .unwrap()
            .with_sunroof()
            .add_safety_feature(SafetyFeature::RearCamera)
            .unwrap()
            .add_interior_feature(InteriorFeature::Gps)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(car.model(), Model::Suv);
        assert_eq!(car.color(), Color::Green);
        assert!(car.has_exterior_feature(ExteriorFeature::Sunroof));
        assert!(car.has_interior_feature(InteriorFeature::Gps));
    }

    #[test]
    fn test_staged_flow_still_validates() {
        let mut wizard = Wizard::new();
        let err = wizard
            .select_model(Model::Compact)
            .unwrap()
            .select_engine(Engine::V8)
            .unwrap()
            .select_transmission(Transmission::Automatic)
            .unwrap()
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), "incompatible_options");
    }

    #[test]
    fn test_null_selection_rejected_at_step() {
        let mut wizard = Wizard::new();
        let err = wizard
            .select_model(Model::Sedan)
            .unwrap()
            .select_engine(None)
            .err()
            .unwrap();
        assert_eq!(err, ConfigError::NullField { field: "engine" });
    }

    #[test]
    fn test_restart_discards_previous_session() {
        let mut wizard = Wizard::new();
        wizard.build_luxury_suv(Color::Red).unwrap();

        let car = wizard
            .restart()
            .select_model(Model::Sedan)
            .unwrap()
            .select_engine(Engine::V6)
            .unwrap()
            .select_transmission(Transmission::Automatic)
            .unwrap()
            .build()
            .unwrap();
        assert!(car.interior_features().is_empty());
        assert_eq!(car.color(), Color::Black);
    }

    #[test]
    fn test_wrapped_builder_keeps_staged_features() {
        let mut builder = CarBuilder::new();
        builder
            .add_safety_feature(SafetyFeature::Abs)
            .unwrap()
            .set_color(Color::White)
            .unwrap();

        let mut wizard = Wizard::from(builder);
        let car = wizard
            .select_model(Model::Sedan)
            .unwrap()
            .select_engine(Engine::V6)
            .unwrap()
            .select_transmission(Transmission::Automatic)
            .unwrap()
            .build()
            .unwrap();

        assert!(car.has_safety_feature(SafetyFeature::Abs));
        assert_eq!(car.color(), Color::White);
    }

    #[test]
    fn test_select_model_keeps_earlier_staging() {
        let mut wizard = Wizard::new();
        wizard
            .select_model(Model::Suv)
            .unwrap()
            .select_engine(Engine::V8)
            .unwrap()
            .select_transmission(Transmission::Automatic)
            .unwrap()
            .add_interior_feature(InteriorFeature::Gps)
            .unwrap();

        let car = wizard
            .select_model(Model::Compact)
            .unwrap()
            .select_engine(Engine::V6)
            .unwrap()
            .select_transmission(Transmission::Automatic)
            .unwrap()
            .build()
            .unwrap();
        assert!(car.has_interior_feature(InteriorFeature::Gps));
    }

    #[test]
    fn test_presets_build_for_every_color() {
        let mut wizard = Wizard::new();
        for color in Color::ALL {
            for preset in Preset::ALL {
                let car = wizard.build_preset(*preset, *color).unwrap();
                assert_eq!(car.color(), *color);
            }
        }
    }

    #[test]
    fn test_sports_preset_contents() {
        let car = Wizard::new().build_sports_car(Color::Red).unwrap();
        assert_eq!(car.model(), Model::Sports);
        assert_eq!(car.transmission(), Transmission::Manual);
        assert!(car.has_exterior_feature(ExteriorFeature::SportRims));
        assert_eq!(car.safety_features().len(), 2);
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!("Luxury-SUV".parse::<Preset>().unwrap(), Preset::Luxury);
        assert_eq!(Preset::parse("sedan"), Some(Preset::Basic));
        assert_eq!(Preset::Sports.to_string(), "sports");
        assert_eq!(" basic ".parse::<Preset>().unwrap(), Preset::Basic);
        assert!("racer".parse::<Preset>().unwrap_err().to_string().contains("racer"));
    }
}
