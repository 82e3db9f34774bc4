// ── Delivery domain types ──

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use showroom_api::Endpoint;

use super::entity_id::EntityId;
use super::{require_some, require_text};
use crate::error::CoreError;
use crate::resource::{Draft, Resource, StatusResource};

define_text_enum! {
    /// Delivery progress, stored in the `statut` column.
    DeliveryStatus {
        #[default]
        Scheduled => "Programmée",
        InTransit => "En cours",
        Delivered => "Livrée",
        Problem => "Problème",
        Postponed => "Reportée",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: EntityId,
    pub client_name: String,
    pub vehicle_model: String,
    pub date_livraison: NaiveDate,
    #[serde(default)]
    pub livreur: Option<String>,
    #[serde(default)]
    pub adresse: Option<String>,
    /// The datastore column is named `statut` for this table.
    #[serde(default)]
    pub statut: DeliveryStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryDraft {
    pub client_name: String,
    pub vehicle_model: String,
    pub date_livraison: Option<NaiveDate>,
    pub livreur: Option<String>,
    pub adresse: Option<String>,
    pub statut: DeliveryStatus,
    pub notes: Option<String>,
}

impl Draft for DeliveryDraft {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("client_name", &self.client_name)?;
        require_text("vehicle_model", &self.vehicle_model)?;
        require_some("date_livraison", self.date_livraison.as_ref())
    }
}

impl Resource for Delivery {
    type Draft = DeliveryDraft;

    const ENDPOINT: Endpoint = showroom_api::endpoint::DELIVERIES;
    const NAME: &'static str = "delivery";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_draft(&self) -> DeliveryDraft {
        DeliveryDraft {
            client_name: self.client_name.clone(),
            vehicle_model: self.vehicle_model.clone(),
            date_livraison: Some(self.date_livraison),
            livreur: self.livreur.clone(),
            adresse: self.adresse.clone(),
            statut: self.statut.clone(),
            notes: self.notes.clone(),
        }
    }
}

impl StatusResource for Delivery {
    type Status = DeliveryStatus;

    fn status(&self) -> &DeliveryStatus {
        &self.statut
    }
}
