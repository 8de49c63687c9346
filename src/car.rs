//! Configuration Value
//!
//! A `Car` only comes out of [`CarBuilder::build`](crate::builder::CarBuilder::build),
//! so every instance has passed compatibility validation. It owns its feature
//! sets outright and exposes them by shared reference only.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::fmt::Write as _;

use crate::catalog::{
    Color, Engine, ExteriorFeature, InteriorFeature, Model, SafetyFeature, Transmission,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Car {
    model: Model,
    engine: Engine,
    transmission: Transmission,
    color: Color,
    interior_features: BTreeSet<InteriorFeature>,
    exterior_features: BTreeSet<ExteriorFeature>,
    safety_features: BTreeSet<SafetyFeature>,
}

impl Car {
    pub(crate) fn new(
        model: Model,
        engine: Engine,
        transmission: Transmission,
        color: Color,
        interior_features: BTreeSet<InteriorFeature>,
        exterior_features: BTreeSet<ExteriorFeature>,
        safety_features: BTreeSet<SafetyFeature>,
    ) -> Self {
        Self {
            model,
            engine,
            transmission,
            color,
            interior_features,
            exterior_features,
            safety_features,
        }
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    pub fn transmission(&self) -> Transmission {
        self.transmission
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn interior_features(&self) -> &BTreeSet<InteriorFeature> {
        &self.interior_features
    }

    pub fn exterior_features(&self) -> &BTreeSet<ExteriorFeature> {
        &self.exterior_features
    }

    pub fn safety_features(&self) -> &BTreeSet<SafetyFeature> {
        &self.safety_features
    }

    pub fn has_interior_feature(&self, feature: InteriorFeature) -> bool {
        self.interior_features.contains(&feature)
    }

    pub fn has_exterior_feature(&self, feature: ExteriorFeature) -> bool {
        self.exterior_features.contains(&feature)
    }

    pub fn has_safety_feature(&self, feature: SafetyFeature) -> bool {
        self.safety_features.contains(&feature)
    }

    /// Multi-line summary. Feature sections with nothing in them are left out.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str("Car Configuration Summary\n");
        out.push_str("========================\n");
        let _ = writeln!(out, "Model: {}", self.model.label());
        let _ = writeln!(out, "Color: {}", self.color.label());
        let _ = writeln!(out, "Engine: {}", self.engine);
        let _ = writeln!(out, "Transmission: {}", self.transmission.label());

        let interior = self.interior_features.iter().map(|f| f.label());
        let exterior = self.exterior_features.iter().map(|f| f.label());
        let safety = self.safety_features.iter().map(|f| f.label());
        push_section(&mut out, "Interior Features", interior);
        push_section(&mut out, "Exterior Features", exterior);
        push_section(&mut out, "Safety Features", safety);

        out
    }
}

fn push_section<'a>(
    out: &mut String,
    heading: &str,
    labels: impl ExactSizeIterator<Item = &'a str>,
) {
    if labels.len() == 0 {
        return;
    }
    let _ = writeln!(out, "\n{}:", heading);
    for label in labels {
        let _ = writeln!(out, "  - {}", label);
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} with {} and {}",
            self.color.label(),
            self.model.label(),
            self.engine.label(),
            self.transmission.label()
        )
    }
}
