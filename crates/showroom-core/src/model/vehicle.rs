// ── Vehicle domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use showroom_api::Endpoint;

use super::entity_id::EntityId;
use super::{null_as_default, require_text};
use crate::error::CoreError;
use crate::resource::{Draft, Resource};

define_text_enum! {
    VehicleCategory {
        #[default]
        Scooter => "Scooter",
        Moto => "Moto",
        ElectricBike => "Vélo électrique",
    }
}

/// A catalog vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: EntityId,
    pub model: String,
    pub category: VehicleCategory,
    pub price: f64,
    /// Range in kilometres.
    #[serde(default)]
    pub autonomy: Option<u32>,
    /// Top speed in km/h.
    #[serde(default)]
    pub max_speed: Option<u32>,
    #[serde(default)]
    pub charging_time: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub in_stock: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock_quantity: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleDraft {
    pub model: String,
    pub category: VehicleCategory,
    pub price: f64,
    pub autonomy: Option<u32>,
    pub max_speed: Option<u32>,
    pub charging_time: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub in_stock: bool,
    pub stock_quantity: u32,
}

impl Draft for VehicleDraft {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("model", &self.model)?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CoreError::ValidationFailed {
                message: format!("price must be a non-negative amount, got {}", self.price),
            });
        }
        Ok(())
    }
}

impl Resource for Vehicle {
    type Draft = VehicleDraft;

    const ENDPOINT: Endpoint = showroom_api::endpoint::VEHICLES;
    const NAME: &'static str = "vehicle";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_draft(&self) -> VehicleDraft {
        VehicleDraft {
            model: self.model.clone(),
            category: self.category.clone(),
            price: self.price,
            autonomy: self.autonomy,
            max_speed: self.max_speed,
            charging_time: self.charging_time.clone(),
            image_url: self.image_url.clone(),
            description: self.description.clone(),
            features: self.features.clone(),
            in_stock: self.in_stock,
            stock_quantity: self.stock_quantity,
        }
    }
}
