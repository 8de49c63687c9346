//! CarConfig Core - Vehicle Configuration Engine
//!
//! # Ground Rules
//! 1. The Catalog Is Closed
//! 2. Mandatory Before Optional: model, engine, transmission
//! 3. Build Always Validates
//! 4. Report Every Defect In One Pass
//! 5. A Built Car Never Changes

pub mod catalog;
pub mod validation;
pub mod car;
pub mod builder;
pub mod wizard;
pub mod hashing;
pub mod order;
pub mod report;
pub mod logging;

pub use catalog::{
    CatalogOption, Color, Dimension, Engine, ExteriorFeature, InteriorFeature, Model,
    SafetyFeature, Transmission, Variant,
};
pub use validation::{CompatibilityRule, CompatibilityViolation, Validator};
pub use car::Car;
pub use builder::{CarBuilder, ConfigError, ConfigurationRequest, RequiredField};
pub use wizard::{Preset, Wizard};
pub use hashing::{canonical_json, configuration_fingerprint};
pub use order::{OrderError, OrderRecord, OrderService, OrderStatus};
pub use report::{
    DocumentRenderer, RenderedDocument, RendererRegistry, ReportError, ReportGenerator,
};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
