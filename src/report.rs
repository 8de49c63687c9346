//! Document Boundary
//!
//! The engine hands a finished [`Car`] (and optionally its [`OrderRecord`])
//! to a renderer chosen by format key. Renderers only read the car.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use thiserror::Error;

use crate::car::Car;
use crate::order::OrderRecord;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Unknown document format '{format}'. Supported formats: {}", .supported.join(", "))]
    UnknownFormat { format: String, supported: Vec<String> },
}

/// Title and body text shared by every output format.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportGenerator;

impl ReportGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn title(&self, car: &Car) -> String {
        format!("{} Configuration Report", car.model().label())
    }

    pub fn report(&self, car: &Car, order: Option<&OrderRecord>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "VEHICLE CONFIGURATION");
        let _ = writeln!(out, "Model: {}", car.model().label());
        let _ = writeln!(out, "Color: {}", car.color().label());

        let _ = writeln!(out, "\nPOWERTRAIN");
        let _ = writeln!(out, "Engine: {}", car.engine());
        let _ = writeln!(out, "Transmission: {}", car.transmission().label());

        section(&mut out, "INTERIOR FEATURES", car.interior_features().iter().map(|f| f.label()));
        section(&mut out, "EXTERIOR FEATURES", car.exterior_features().iter().map(|f| f.label()));
        section(&mut out, "SAFETY FEATURES", car.safety_features().iter().map(|f| f.label()));

        if let Some(order) = order {
            let _ = writeln!(out, "\nORDER");
            let _ = writeln!(out, "Order ID: {}", order.id);
            let _ = writeln!(out, "Created: {}", order.created_at.to_rfc3339());
            let _ = writeln!(out, "Status: {}", order.status);
        }

        out
    }
}

fn section<'a>(out: &mut String, heading: &str, mut labels: impl Iterator<Item = &'a str>) {
    let Some(first) = labels.next() else {
        return;
    };
    let _ = writeln!(out, "\n{}", heading);
    let _ = writeln!(out, "- {}", first);
    for label in labels {
        let _ = writeln!(out, "- {}", label);
    }
}

/// Everything a renderer gets to see.
#[derive(Debug, Clone, Copy)]
pub struct DocumentRequest<'a> {
    pub car: &'a Car,
    pub order: Option<&'a OrderRecord>,
    pub title: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedDocument {
    pub format: String,
    pub title: String,
    pub preview: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

pub trait DocumentRenderer {
    /// Lowercase key this renderer answers to.
    fn format_key(&self) -> &'static str;
    fn render(&self, request: &DocumentRequest<'_>) -> RenderedDocument;
}

pub struct PlainTextRenderer;

impl DocumentRenderer for PlainTextRenderer {
    fn format_key(&self) -> &'static str { "txt" }

    fn render(&self, request: &DocumentRequest<'_>) -> RenderedDocument {
        let rule = "=".repeat(request.title.len());
        let text = format!("{}\n{}\n\n{}", request.title, rule, request.content);
        RenderedDocument {
            format: self.format_key().to_string(),
            title: request.title.to_string(),
            preview: text.clone(),
            bytes: text.into_bytes(),
        }
    }
}

/// Renderer registry - resolves format keys case-insensitively
pub struct RendererRegistry {
    renderers: BTreeMap<String, Box<dyn DocumentRenderer>>,
    generator: ReportGenerator,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self {
            renderers: BTreeMap::new(),
            generator: ReportGenerator::new(),
        }
    }

    /// Registry with the built-in plain text renderer.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(PlainTextRenderer));
        registry
    }

    pub fn register(&mut self, renderer: Box<dyn DocumentRenderer>) {
        self.renderers.insert(renderer.format_key().to_lowercase(), renderer);
    }

    pub fn supported_formats(&self) -> Vec<String> {
        self.renderers.keys().cloned().collect()
    }

    pub fn get(&self, format: &str) -> Result<&dyn DocumentRenderer, ReportError> {
        self.renderers
            .get(&format.trim().to_lowercase())
            .map(|r| &**r)
            .ok_or_else(|| ReportError::UnknownFormat {
                format: format.to_string(),
                supported: self.supported_formats(),
            })
    }

    pub fn render(
        &self,
        car: &Car,
        format: &str,
        order: Option<&OrderRecord>,
    ) -> Result<RenderedDocument, ReportError> {
        let renderer = self.get(format)?;
        let title = self.generator.title(car);
        let content = self.generator.report(car, order);
        tracing::debug!(format = renderer.format_key(), title = %title, "rendering document");

        Ok(renderer.render(&DocumentRequest {
            car,
            order,
            title: &title,
            content: &content,
        }))
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
