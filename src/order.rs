//! Order Records
//!
//! Stamps a finished configuration with an id, a creation time and a status.
//! The record is opaque to the rest of the engine.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::car::Car;
use crate::hashing::configuration_fingerprint;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Placed,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Placed => write!(f, "PLACED"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderRecord {
    pub id: Uuid,
    pub car: Car,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub fingerprint: String,
}

#[derive(Debug, Default)]
pub struct OrderService;

impl OrderService {
    pub fn new() -> Self {
        Self
    }

    pub fn place_order(&self, car: &Car) -> Result<OrderRecord, OrderError> {
        let record = OrderRecord {
            id: Uuid::new_v4(),
            car: car.clone(),
            created_at: Utc::now(),
            status: OrderStatus::Placed,
            fingerprint: configuration_fingerprint(car)?,
        };
        tracing::info!(order_id = %record.id, car = %car, "order placed");
        Ok(record)
    }
}
