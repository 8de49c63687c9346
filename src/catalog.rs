//! Option Catalog - Closed Variant Sets
//!
//! Every configurable dimension is a closed enum. The model table below is
//! the single source of truth for which variants are legal together; it is
//! a pure function of the model and never changes at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Model {
    Sedan,
    Suv,
    Sports,
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Engine {
    V6,
    V8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transmission {
    Manual,
    Automatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteriorFeature {
    Leather,
    Gps,
    SoundSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExteriorFeature {
    Sunroof,
    SportRims,
    StandardRims,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyFeature {
    Abs,
    Airbags,
    RearCamera,
}

/// Paint color. Not constrained by the model table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Black,
    White,
    Silver,
    Red,
    Blue,
    Green,
}

/// One configurable axis that the model table constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Engine,
    Transmission,
    Interior,
    Exterior,
    Safety,
}

impl Dimension {
    pub const ALL: &'static [Dimension] = &[
        Dimension::Engine,
        Dimension::Transmission,
        Dimension::Interior,
        Dimension::Exterior,
        Dimension::Safety,
    ];

    /// Singular name used at the start of violation messages.
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Engine => "Engine",
            Dimension::Transmission => "Transmission",
            Dimension::Interior => "Interior feature",
            Dimension::Exterior => "Exterior feature",
            Dimension::Safety => "Safety feature",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Dimension::Engine => "engines",
            Dimension::Transmission => "transmissions",
            Dimension::Interior => "interior features",
            Dimension::Exterior => "exterior features",
            Dimension::Safety => "safety features",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Any single value from a model-constrained dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "dimension", content = "value", rename_all = "snake_case")]
pub enum Variant {
    Engine(Engine),
    Transmission(Transmission),
    Interior(InteriorFeature),
    Exterior(ExteriorFeature),
    Safety(SafetyFeature),
}

impl Variant {
    pub fn dimension(&self) -> Dimension {
        match self {
            Variant::Engine(_) => Dimension::Engine,
            Variant::Transmission(_) => Dimension::Transmission,
            Variant::Interior(_) => Dimension::Interior,
            Variant::Exterior(_) => Dimension::Exterior,
            Variant::Safety(_) => Dimension::Safety,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Variant::Engine(v) => v.label(),
            Variant::Transmission(v) => v.label(),
            Variant::Interior(v) => v.label(),
            Variant::Exterior(v) => v.label(),
            Variant::Safety(v) => v.label(),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shared surface of the five model-constrained option enums.
///
/// `allowed_for` is total over [`Model`] and never returns an empty slice.
/// Slices are in declaration order, which is also the `Ord` order.
pub trait CatalogOption: Copy + Ord + fmt::Debug + 'static {
    const DIMENSION: Dimension;
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;
    fn allowed_for(model: Model) -> &'static [Self];
    fn into_variant(self) -> Variant;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} '{input}'. Available: {available}")]
pub struct ParseOptionError {
    pub kind: &'static str,
    pub input: String,
    pub available: String,
}

// --- Model table ---

const ALL_ENGINES: &[Engine] = &[Engine::V6, Engine::V8];
const ALL_TRANSMISSIONS: &[Transmission] = &[Transmission::Manual, Transmission::Automatic];
const ALL_INTERIOR: &[InteriorFeature] = &[
    InteriorFeature::Leather,
    InteriorFeature::Gps,
    InteriorFeature::SoundSystem,
];
const ALL_EXTERIOR: &[ExteriorFeature] = &[
    ExteriorFeature::Sunroof,
    ExteriorFeature::SportRims,
    ExteriorFeature::StandardRims,
];
const ALL_SAFETY: &[SafetyFeature] = &[
    SafetyFeature::Abs,
    SafetyFeature::Airbags,
    SafetyFeature::RearCamera,
];

impl Model {
    pub const ALL: &'static [Model] = &[Model::Sedan, Model::Suv, Model::Sports, Model::Compact];

    pub fn key(&self) -> &'static str {
        match self {
            Model::Sedan => "sedan",
            Model::Suv => "suv",
            Model::Sports => "sports",
            Model::Compact => "compact",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Model::Sedan => "Sedan",
            Model::Suv => "SUV",
            Model::Sports => "Sports Car",
            Model::Compact => "Compact",
        }
    }

    pub fn allowed_engines(&self) -> &'static [Engine] {
        match self {
            Model::Sedan => &[Engine::V6],
            Model::Suv => ALL_ENGINES,
            Model::Sports => &[Engine::V8],
            Model::Compact => &[Engine::V6],
        }
    }

    pub fn allowed_transmissions(&self) -> &'static [Transmission] {
        match self {
            Model::Sedan | Model::Suv => ALL_TRANSMISSIONS,
            Model::Sports => &[Transmission::Manual],
            Model::Compact => &[Transmission::Automatic],
        }
    }

    pub fn allowed_interior_features(&self) -> &'static [InteriorFeature] {
        match self {
            Model::Sedan | Model::Suv => ALL_INTERIOR,
            Model::Sports => &[InteriorFeature::Leather, InteriorFeature::SoundSystem],
            Model::Compact => &[InteriorFeature::Gps],
        }
    }

    pub fn allowed_exterior_features(&self) -> &'static [ExteriorFeature] {
        match self {
            Model::Sedan | Model::Compact => &[ExteriorFeature::StandardRims],
            Model::Suv => ALL_EXTERIOR,
            Model::Sports => &[ExteriorFeature::Sunroof, ExteriorFeature::SportRims],
        }
    }

    pub fn allowed_safety_features(&self) -> &'static [SafetyFeature] {
        match self {
            Model::Sedan => &[SafetyFeature::Abs, SafetyFeature::Airbags],
            Model::Suv | Model::Sports => ALL_SAFETY,
            Model::Compact => &[SafetyFeature::Abs, SafetyFeature::RearCamera],
        }
    }

    /// Membership test for any constrained dimension.
    pub fn supports<O: CatalogOption>(&self, option: O) -> bool {
        O::allowed_for(*self).contains(&option)
    }

    /// Full allowed set for the dimension of `O`, as variants.
    pub fn allowed_variants<O: CatalogOption>(&self) -> Vec<Variant> {
        O::allowed_for(*self)
            .iter()
            .map(|o| o.into_variant())
            .collect()
    }

    pub fn parse(s: &str) -> Option<Model> {
        parse_by_name(Model::ALL, s, |m| m.key(), |m| m.label())
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Model {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Model::parse(s).ok_or_else(|| parse_error("model", s, Model::ALL, |m| m.key()))
    }
}

impl Engine {
    pub fn label(&self) -> &'static str {
        match self {
            Engine::V6 => "V6 Engine",
            Engine::V8 => "V8 Engine",
        }
    }

    pub fn horsepower(&self) -> u32 {
        match self {
            Engine::V6 => 300,
            Engine::V8 => 450,
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} HP)", self.label(), self.horsepower())
    }
}

impl Transmission {
    pub fn label(&self) -> &'static str {
        match self {
            Transmission::Manual => "Manual Transmission",
            Transmission::Automatic => "Automatic Transmission",
        }
    }
}

impl InteriorFeature {
    pub fn label(&self) -> &'static str {
        match self {
            InteriorFeature::Leather => "Leather Interior",
            InteriorFeature::Gps => "GPS Navigation System",
            InteriorFeature::SoundSystem => "Premium Sound System",
        }
    }
}

impl ExteriorFeature {
    pub fn label(&self) -> &'static str {
        match self {
            ExteriorFeature::Sunroof => "Panoramic Sunroof",
            ExteriorFeature::SportRims => "Sport Alloy Rims",
            ExteriorFeature::StandardRims => "Standard Rims",
        }
    }
}

impl SafetyFeature {
    pub fn label(&self) -> &'static str {
        match self {
            SafetyFeature::Abs => "Anti-lock Braking System (ABS)",
            SafetyFeature::Airbags => "Full Airbag System",
            SafetyFeature::RearCamera => "Rear View Camera",
        }
    }
}

impl Color {
    pub const ALL: &'static [Color] = &[
        Color::Black,
        Color::White,
        Color::Silver,
        Color::Red,
        Color::Blue,
        Color::Green,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
            Color::Silver => "silver",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Color::Black => "Black",
            Color::White => "White",
            Color::Silver => "Silver",
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Green => "Green",
        }
    }

    pub fn parse(s: &str) -> Option<Color> {
        parse_by_name(Color::ALL, s, |c| c.key(), |c| c.label())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Color {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s).ok_or_else(|| parse_error("color", s, Color::ALL, |c| c.key()))
    }
}

macro_rules! label_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

label_display!(Transmission, InteriorFeature, ExteriorFeature, SafetyFeature);

impl CatalogOption for Engine {
    const DIMENSION: Dimension = Dimension::Engine;
    const ALL: &'static [Self] = ALL_ENGINES;

    fn label(&self) -> &'static str { Engine::label(self) }
    fn allowed_for(model: Model) -> &'static [Self] { model.allowed_engines() }
    fn into_variant(self) -> Variant { Variant::Engine(self) }
}

impl CatalogOption for Transmission {
    const DIMENSION: Dimension = Dimension::Transmission;
    const ALL: &'static [Self] = ALL_TRANSMISSIONS;

    fn label(&self) -> &'static str { Transmission::label(self) }
    fn allowed_for(model: Model) -> &'static [Self] { model.allowed_transmissions() }
    fn into_variant(self) -> Variant { Variant::Transmission(self) }
}

impl CatalogOption for InteriorFeature {
    const DIMENSION: Dimension = Dimension::Interior;
    const ALL: &'static [Self] = ALL_INTERIOR;

    fn label(&self) -> &'static str { InteriorFeature::label(self) }
    fn allowed_for(model: Model) -> &'static [Self] { model.allowed_interior_features() }
    fn into_variant(self) -> Variant { Variant::Interior(self) }
}

impl CatalogOption for ExteriorFeature {
    const DIMENSION: Dimension = Dimension::Exterior;
    const ALL: &'static [Self] = ALL_EXTERIOR;

    fn label(&self) -> &'static str { ExteriorFeature::label(self) }
    fn allowed_for(model: Model) -> &'static [Self] { model.allowed_exterior_features() }
    fn into_variant(self) -> Variant { Variant::Exterior(self) }
}

impl CatalogOption for SafetyFeature {
    const DIMENSION: Dimension = Dimension::Safety;
    const ALL: &'static [Self] = ALL_SAFETY;

    fn label(&self) -> &'static str { SafetyFeature::label(self) }
    fn allowed_for(model: Model) -> &'static [Self] { model.allowed_safety_features() }
    fn into_variant(self) -> Variant { Variant::Safety(self) }
}

fn parse_by_name<T: Copy>(
    all: &[T],
    input: &str,
    key: impl Fn(&T) -> &'static str,
    label: impl Fn(&T) -> &'static str,
) -> Option<T> {
    let wanted = input.trim().replace('-', "_");
    all.iter()
        .find(|v| {
            key(v).eq_ignore_ascii_case(&wanted) || label(v).eq_ignore_ascii_case(input.trim())
        })
        .copied()
}

fn parse_error<T>(
    kind: &'static str,
    input: &str,
    all: &[T],
    key: impl Fn(&T) -> &'static str,
) -> ParseOptionError {
    ParseOptionError {
        kind,
        input: input.to_string(),
        available: all.iter().map(key).collect::<Vec<_>>().join(", "),
    }
}

/// Serializable view of one model's row in the table.
#[derive(Debug, Clone, Serialize)]
pub struct ModelEntry {
    pub model: Model,
    pub label: &'static str,
    pub engines: &'static [Engine],
    pub transmissions: &'static [Transmission],
    pub interior: &'static [InteriorFeature],
    pub exterior: &'static [ExteriorFeature],
    pub safety: &'static [SafetyFeature],
}

pub fn catalog_entry(model: Model) -> ModelEntry {
    ModelEntry {
        model,
        label: model.label(),
        engines: model.allowed_engines(),
        transmissions: model.allowed_transmissions(),
        interior: model.allowed_interior_features(),
        exterior: model.allowed_exterior_features(),
        safety: model.allowed_safety_features(),
    }
}

pub fn catalog() -> Vec<ModelEntry> {
    Model::ALL.iter().copied().map(catalog_entry).collect()
}
