//! Validation System - Compatibility Rules
//!
//! Rules produce structured violations, one per offending value.
//! The validator runs every rule and concatenates; it never stops early.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::catalog::{
    CatalogOption, Dimension, Engine, ExteriorFeature, InteriorFeature, Model, SafetyFeature,
    Transmission, Variant,
};

/// One selected value that the model does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityViolation {
    pub offending: Variant,
    pub model: Model,
    pub allowed: Vec<Variant>,
}

impl CompatibilityViolation {
    fn for_option<O: CatalogOption>(model: Model, option: O) -> Self {
        Self {
            offending: option.into_variant(),
            model,
            allowed: model.allowed_variants::<O>(),
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.offending.dimension()
    }
}

impl fmt::Display for CompatibilityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let allowed: Vec<_> = self.allowed.iter().map(|v| v.label()).collect();
        write!(
            f,
            "{} '{}' is not supported by {}. Allowed {}: [{}]",
            self.dimension().name(),
            self.offending.label(),
            self.model.label(),
            self.dimension().plural(),
            allowed.join(", ")
        )
    }
}

/// A candidate whose mandatory fields are all present.
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    pub model: Model,
    pub engine: Engine,
    pub transmission: Transmission,
    pub interior: &'a BTreeSet<InteriorFeature>,
    pub exterior: &'a BTreeSet<ExteriorFeature>,
    pub safety: &'a BTreeSet<SafetyFeature>,
}

/// Compatibility rule trait - produces violations
pub trait CompatibilityRule {
    fn name(&self) -> &'static str;
    fn check(&self, selection: &Selection<'_>) -> Vec<CompatibilityViolation>;
}

fn check_single<O: CatalogOption>(model: Model, option: O) -> Vec<CompatibilityViolation> {
    if model.supports(option) {
        vec![]
    } else {
        vec![CompatibilityViolation::for_option(model, option)]
    }
}

// BTreeSet iteration is declaration order, so output is reproducible.
fn check_features<O: CatalogOption>(
    model: Model,
    staged: &BTreeSet<O>,
) -> Vec<CompatibilityViolation> {
    staged
        .iter()
        .filter(|f| !model.supports(**f))
        .map(|f| CompatibilityViolation::for_option(model, *f))
        .collect()
}

// --- Concrete Rules ---

pub struct EngineRule;

impl CompatibilityRule for EngineRule {
    fn name(&self) -> &'static str { "engine" }

    fn check(&self, selection: &Selection<'_>) -> Vec<CompatibilityViolation> {
        check_single(selection.model, selection.engine)
    }
}

pub struct TransmissionRule;

impl CompatibilityRule for TransmissionRule {
    fn name(&self) -> &'static str { "transmission" }

    fn check(&self, selection: &Selection<'_>) -> Vec<CompatibilityViolation> {
        check_single(selection.model, selection.transmission)
    }
}

pub struct InteriorRule;

impl CompatibilityRule for InteriorRule {
    fn name(&self) -> &'static str { "interior" }

    fn check(&self, selection: &Selection<'_>) -> Vec<CompatibilityViolation> {
        check_features(selection.model, selection.interior)
    }
}

pub struct ExteriorRule;

impl CompatibilityRule for ExteriorRule {
    fn name(&self) -> &'static str { "exterior" }

    fn check(&self, selection: &Selection<'_>) -> Vec<CompatibilityViolation> {
        check_features(selection.model, selection.exterior)
    }
}

pub struct SafetyRule;

impl CompatibilityRule for SafetyRule {
    fn name(&self) -> &'static str { "safety" }

    fn check(&self, selection: &Selection<'_>) -> Vec<CompatibilityViolation> {
        check_features(selection.model, selection.safety)
    }
}

/// Validator runs the rules in a fixed order and collects everything.
pub struct Validator {
    rules: Vec<Box<dyn CompatibilityRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(EngineRule),
                Box::new(TransmissionRule),
                Box::new(InteriorRule),
                Box::new(ExteriorRule),
                Box::new(SafetyRule),
            ],
        }
    }

    pub fn validate(&self, selection: &Selection<'_>) -> Vec<CompatibilityViolation> {
        let mut all_violations = vec![];

        for rule in &self.rules {
            let violations = rule.check(selection);
            if !violations.is_empty() {
                tracing::debug!(
                    rule = rule.name(),
                    model = selection.model.key(),
                    count = violations.len(),
                    "compatibility rule rejected selection"
                );
            }
            all_violations.extend(violations);
        }

        all_violations
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
