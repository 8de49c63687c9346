//! CarConfig CLI - JSON front door to the configuration engine
//!
//! Commands: catalog, presets, preset, build, render
//! Outputs JSON to stdout, logs to stderr
//! Returns 2 when a configuration is rejected, 1 on bad input

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::process::ExitCode;

use carconfig_core::{
    catalog::{catalog, catalog_entry},
    logging::{init_logging, LogConfig},
    CarBuilder, Color, ConfigError, ConfigurationRequest, Model, OrderService, Preset,
    RendererRegistry, Wizard, configuration_fingerprint, ENGINE_VERSION,
};

#[derive(Parser)]
#[command(name = "carconfig-cli")]
#[command(about = "CarConfig CLI - Vehicle Configuration Engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (error, warn, info, debug, trace); overrides CARCONFIG_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format (human, json); overrides CARCONFIG_LOG_FORMAT
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which options each model allows
    Catalog {
        /// Restrict output to one model
        #[arg(short, long)]
        model: Option<String>,
    },

    /// List available presets
    Presets,

    /// Build a preset configuration
    Preset {
        /// Preset name (basic, luxury, sports)
        #[arg(short, long)]
        name: String,

        /// Paint color
        #[arg(short, long, default_value = "black")]
        color: String,
    },

    /// Validate and build a configuration
    Build {
        /// JSON payload (ConfigurationRequest)
        #[arg(short, long)]
        payload: String,
    },

    /// Build a configuration and render it as a document
    Render {
        /// JSON payload (ConfigurationRequest)
        #[arg(short, long)]
        payload: String,

        /// Document format key
        #[arg(short, long, default_value = "txt")]
        format: String,

        /// Place an order and include it in the document
        #[arg(long)]
        order: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_env(
        cli.log_level.as_deref(),
        cli.log_format.as_deref(),
    ));

    match cli.command {
        Commands::Catalog { model } => {
            let output = match model {
                Some(name) => match name.parse::<Model>() {
                    Ok(model) => json!({
                        "engine_version": ENGINE_VERSION,
                        "models": [catalog_entry(model)],
                    }),
                    Err(e) => return usage_error(e.to_string()),
                },
                None => json!({
                    "engine_version": ENGINE_VERSION,
                    "models": catalog(),
                }),
            };
            println!("{:#}", output);
            ExitCode::SUCCESS
        }

        Commands::Presets => {
            let presets: Vec<_> = Preset::ALL
                .iter()
                .map(|p| json!({
                    "name": p.as_str(),
                    "description": p.description(),
                }))
                .collect();

            println!("{:#}", Value::Array(presets));
            ExitCode::SUCCESS
        }

        Commands::Preset { name, color } => {
            let preset: Preset = match name.parse() {
                Ok(p) => p,
                Err(e) => return usage_error(e.to_string()),
            };
            let color: Color = match color.parse() {
                Ok(c) => c,
                Err(e) => return usage_error(e.to_string()),
            };

            match Wizard::new().build_preset(preset, color) {
                Ok(car) => {
                    println!("{:#}", json!({
                        "success": true,
                        "car": car,
                        "summary": car.summary(),
                    }));
                    ExitCode::SUCCESS
                }
                Err(e) => rejected(&e),
            }
        }

        Commands::Build { payload } => {
            let request = match parse_request(&payload) {
                Ok(r) => r,
                Err(code) => return code,
            };

            match build(&request) {
                Ok(car) => {
                    let fingerprint = match configuration_fingerprint(&car) {
                        Ok(f) => f,
                        Err(e) => return usage_error(e.to_string()),
                    };
                    println!("{:#}", json!({
                        "success": true,
                        "car": car,
                        "summary": car.summary(),
                        "fingerprint": fingerprint,
                    }));
                    ExitCode::SUCCESS
                }
                Err(e) => rejected(&e),
            }
        }

        Commands::Render { payload, format, order } => {
            let request = match parse_request(&payload) {
                Ok(r) => r,
                Err(code) => return code,
            };

            let car = match build(&request) {
                Ok(car) => car,
                Err(e) => return rejected(&e),
            };

            let record = if order {
                match OrderService::new().place_order(&car) {
                    Ok(record) => Some(record),
                    Err(e) => return usage_error(e.to_string()),
                }
            } else {
                None
            };

            let registry = RendererRegistry::with_defaults();
            match registry.render(&car, &format, record.as_ref()) {
                Ok(document) => {
                    let data = base64::Engine::encode(
                        &base64::engine::general_purpose::STANDARD,
                        &document.bytes,
                    );
                    println!("{:#}", json!({
                        "success": true,
                        "document": document,
                        "data_base64": data,
                        "order": record,
                    }));
                    ExitCode::SUCCESS
                }
                Err(e) => usage_error(e.to_string()),
            }
        }
    }
}

fn parse_request(payload: &str) -> Result<ConfigurationRequest, ExitCode> {
    serde_json::from_str(payload).map_err(|e| usage_error(format!("Invalid payload: {}", e)))
}

fn build(request: &ConfigurationRequest) -> Result<carconfig_core::Car, ConfigError> {
    CarBuilder::new().apply(request)?.build()
}

fn usage_error(message: String) -> ExitCode {
    println!("{}", json!({ "success": false, "error": message }));
    ExitCode::FAILURE
}

fn rejected(error: &ConfigError) -> ExitCode {
    let details = match error {
        ConfigError::NullField { field } => json!([field]),
        ConfigError::MissingFields(fields) => json!(fields),
        ConfigError::IncompatibleOptions(violations) => Value::Array(
            violations
                .iter()
                .map(|v| json!({
                    "violation": v,
                    "message": v.to_string(),
                }))
                .collect(),
        ),
    };

    println!("{:#}", json!({
        "success": false,
        "kind": error.kind(),
        "error": error.to_string(),
        "details": details,
    }));
    ExitCode::from(2)  // Configuration rejected
}
