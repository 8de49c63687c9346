//! Contract Invariant Tests
//!
//! These tests verify the non-negotiable guarantees.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use carconfig_core::{
    configuration_fingerprint, Car, CarBuilder, CatalogOption, Color, ConfigError, ConfigurationRequest, Engine,
    ExteriorFeature, InteriorFeature, Model, Preset, RequiredField, SafetyFeature, Transmission,
    Variant, Wizard,
};

fn luxury_builder() -> CarBuilder {
    let mut builder = CarBuilder::new();
    builder
        .with_model(Model::Suv)
        .unwrap()
        .with_engine(Engine::V8)
        .unwrap()
        .with_transmission(Transmission::Automatic)
        .unwrap()
        .set_color(Color::Silver)
        .unwrap()
        .add_interior_features([
            InteriorFeature::Leather,
            InteriorFeature::Gps,
            InteriorFeature::SoundSystem,
        ])
        .unwrap()
        .add_exterior_features([ExteriorFeature::Sunroof, ExteriorFeature::SportRims])
        .unwrap()
        .add_safety_features([
            SafetyFeature::Abs,
            SafetyFeature::Airbags,
            SafetyFeature::RearCamera,
        ])
        .unwrap();
    builder
}

fn hash_of(car: &Car) -> u64 {
    let mut hasher = DefaultHasher::new();
    car.hash(&mut hasher);
    hasher.finish()
}

fn assert_within_catalog(car: &Car) {
    let model = car.model();
    assert!(model.supports(car.engine()));
    assert!(model.supports(car.transmission()));
    assert!(car.interior_features().iter().all(|f| model.supports(*f)));
    assert!(car.exterior_features().iter().all(|f| model.supports(*f)));
    assert!(car.safety_features().iter().all(|f| model.supports(*f)));
}

#[test]
fn invariant_every_model_allows_something_in_every_dimension() {
    for model in Model::ALL {
        assert!(!Engine::allowed_for(*model).is_empty());
        assert!(!Transmission::allowed_for(*model).is_empty());
        assert!(!InteriorFeature::allowed_for(*model).is_empty());
        assert!(!ExteriorFeature::allowed_for(*model).is_empty());
        assert!(!SafetyFeature::allowed_for(*model).is_empty());
    }
}

#[test]
fn invariant_every_preset_stays_within_catalog() {
    let mut wizard = Wizard::new();
    for preset in Preset::ALL {
        for color in Color::ALL {
            let car = wizard.build_preset(*preset, *color).unwrap();
            assert_within_catalog(&car);
        }
    }
}

fn check_exhaustive<O, F>(stage: F)
where
    O: CatalogOption,
    F: Fn(&mut CarBuilder, O),
{
    // Every model/engine/transmission plus every single feature: whatever
    // builds must be legal, whatever is legal must build.
    for model in Model::ALL {
        for engine in Engine::ALL {
            for transmission in Transmission::ALL {
                for feature in O::ALL {
                    let mut builder = CarBuilder::new();
                    builder
                        .with_model(*model)
                        .unwrap()
                        .with_engine(*engine)
                        .unwrap()
                        .with_transmission(*transmission)
                        .unwrap();
                    stage(&mut builder, *feature);

                    let legal = model.supports(*engine)
                        && model.supports(*transmission)
                        && model.supports(*feature);
                    match builder.build() {
                        Ok(car) => {
                            assert!(legal);
                            assert_within_catalog(&car);
                        }
                        Err(ConfigError::IncompatibleOptions(violations)) => {
                            assert!(!legal);
                            assert!(!violations.is_empty());
                        }
                        Err(other) => panic!("unexpected error: {other}"),
                    }
                }
            }
        }
    }
}

#[test]
fn invariant_exhaustive_builds_never_escape_catalog() {
    check_exhaustive(|b: &mut CarBuilder, f: InteriorFeature| {
        b.add_interior_feature(f).unwrap();
    });
    check_exhaustive(|b: &mut CarBuilder, f: ExteriorFeature| {
        b.add_exterior_feature(f).unwrap();
    });
    check_exhaustive(|b: &mut CarBuilder, f: SafetyFeature| {
        b.add_safety_feature(f).unwrap();
    });
}

#[test]
fn invariant_empty_build_reports_all_missing_fields() {
    let err = CarBuilder::new().build().unwrap_err();
    assert_eq!(
        err,
        ConfigError::MissingFields(vec![
            RequiredField::Model,
            RequiredField::Engine,
            RequiredField::Transmission,
        ])
    );
}

#[test]
fn invariant_sedan_v8_reports_exactly_one_violation() {
    let mut builder = CarBuilder::new();
    builder
        .with_model(Model::Sedan)
        .unwrap()
        .with_engine(Engine::V8)
        .unwrap()
        .with_transmission(Transmission::Automatic)
        .unwrap();

    match builder.build().unwrap_err() {
        ConfigError::IncompatibleOptions(violations) => {
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].offending, Variant::Engine(Engine::V8));
            assert_eq!(violations[0].model, Model::Sedan);
            assert_eq!(violations[0].allowed, vec![Variant::Engine(Engine::V6)]);

            let message = violations[0].to_string();
            assert!(message.contains("V8"));
            assert!(message.contains("Sedan"));
            assert!(message.contains("V6"));
        }
        other => panic!("expected incompatible options, got {other:?}"),
    }
}

#[test]
fn invariant_duplicate_feature_present_once_and_reset_is_fresh() {
    let mut builder = luxury_builder();
    builder.add_safety_feature(SafetyFeature::Abs).unwrap();
    let car = builder.build().unwrap();
    assert_eq!(car.safety_features().len(), 3);

    builder.reset();
    assert_eq!(
        builder.build().unwrap_err(),
        CarBuilder::new().build().unwrap_err()
    );
}

#[test]
fn invariant_equal_inputs_equal_values() {
    let a = luxury_builder().build().unwrap();
    let b = luxury_builder().build().unwrap();
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));

    let mut builder = luxury_builder();
    builder.set_color(Color::Red).unwrap();
    assert_ne!(a, builder.build().unwrap());

    let mut builder = CarBuilder::new();
    builder
        .with_model(Model::Suv)
        .unwrap()
        .with_engine(Engine::V8)
        .unwrap()
        .with_transmission(Transmission::Automatic)
        .unwrap()
        .set_color(Color::Silver)
        .unwrap()
        .add_interior_features([InteriorFeature::Leather, InteriorFeature::Gps])
        .unwrap()
        .add_exterior_features([ExteriorFeature::Sunroof, ExteriorFeature::SportRims])
        .unwrap()
        .add_safety_features([
            SafetyFeature::Abs,
            SafetyFeature::Airbags,
            SafetyFeature::RearCamera,
        ])
        .unwrap();
    assert_ne!(a, builder.build().unwrap());
}

#[test]
fn invariant_luxury_suv_end_to_end() {
    let car = luxury_builder().build().unwrap();
    assert_eq!(car, Wizard::new().build_luxury_suv(Color::Silver).unwrap());

    let summary = car.summary();
    assert!(summary.contains("Model: SUV"));
    assert!(summary.contains("Color: Silver"));
    for heading in ["Interior Features:", "Exterior Features:", "Safety Features:"] {
        assert!(summary.contains(heading), "missing section {heading}");
    }
    for label in [
        "Leather Interior",
        "GPS Navigation System",
        "Premium Sound System",
        "Panoramic Sunroof",
        "Sport Alloy Rims",
        "Anti-lock Braking System (ABS)",
        "Full Airbag System",
        "Rear View Camera",
    ] {
        assert!(summary.contains(label), "missing feature {label}");
    }
}

#[test]
fn invariant_wizard_keeps_features_staged_on_wrapped_builder() {
    let mut builder = CarBuilder::new();
    builder.add_safety_feature(SafetyFeature::Abs).unwrap();

    let mut wizard = Wizard::with_builder(builder);
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
    assert!(car.safety_features().is_empty());
}

#[test]
fn invariant_basic_sedan_for_every_color() {
    let mut wizard = Wizard::new();
    for color in Color::ALL {
        let car = wizard.build_basic_sedan(*color).unwrap();
        assert_eq!(car.model(), Model::Sedan);
        assert_eq!(car.engine(), Engine::V6);
        assert_eq!(car.transmission(), Transmission::Automatic);
        assert!(car.has_safety_feature(SafetyFeature::Abs));
        assert_eq!(car.color(), *color);
    }
}

#[test]
fn invariant_built_car_shared_across_threads() {
    let car = std::sync::Arc::new(luxury_builder().build().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let car = std::sync::Arc::clone(&car);
            std::thread::spawn(move || car.summary())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), car.summary());
    }
}

#[test]
fn invariant_every_built_car_has_a_fingerprint() {
    let mut wizard = Wizard::new();
    for preset in Preset::ALL {
        let car = wizard.build_preset(*preset, Color::Blue).unwrap();
        let fingerprint = configuration_fingerprint(&car).unwrap();
        assert_eq!(fingerprint.len(), 64);
        assert!(fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
    }
}

#[test]
fn invariant_json_request_goes_through_validation() {
    let request: ConfigurationRequest = serde_json::from_value(serde_json::json!({
        "model": "compact",
        "engine": "v8",
        "transmission": "manual",
        "exterior": ["sunroof"]
    }))
    .unwrap();

    let err = CarBuilder::new().apply(&request).unwrap().build().unwrap_err();
    match err {
        ConfigError::IncompatibleOptions(violations) => assert_eq!(violations.len(), 3),
        other => panic!("expected incompatible options, got {other:?}"),
    }
}
