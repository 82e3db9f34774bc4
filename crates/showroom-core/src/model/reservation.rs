// ── Reservation domain types ──

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use showroom_api::Endpoint;

use super::entity_id::EntityId;
use super::{require_some, require_text};
use crate::error::CoreError;
use crate::resource::{Draft, Resource, StatusResource};

/// Reservation type used when none was chosen.
pub const DEFAULT_RESERVATION_TYPE: &str = "Standard";

define_text_enum! {
    ReservationStatus {
        #[default]
        Pending => "En attente",
        Confirmed => "Confirmée",
        InProgress => "En cours",
        Completed => "Terminée",
        Cancelled => "Annulée",
    }
}

fn default_reservation_type() -> String {
    DEFAULT_RESERVATION_TYPE.to_owned()
}

/// A customer's hold on a vehicle model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: EntityId,
    pub client_name: String,
    pub telephone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub vehicle_model: String,
    #[serde(default = "default_reservation_type")]
    pub reservation_type: String,
    pub date_reservation: NaiveDate,
    #[serde(default)]
    pub date_retrait: Option<NaiveDate>,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationDraft {
    pub client_name: String,
    pub telephone: String,
    pub email: Option<String>,
    pub vehicle_model: String,
    pub reservation_type: String,
    pub date_reservation: Option<NaiveDate>,
    pub date_retrait: Option<NaiveDate>,
    pub status: ReservationStatus,
    pub notes: Option<String>,
}

impl Default for ReservationDraft {
    fn default() -> Self {
        Self {
            client_name: String::new(),
            telephone: String::new(),
            email: None,
            vehicle_model: String::new(),
            reservation_type: default_reservation_type(),
            date_reservation: None,
            date_retrait: None,
            status: ReservationStatus::default(),
            notes: None,
        }
    }
}

impl Draft for ReservationDraft {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("client_name", &self.client_name)?;
        require_text("telephone", &self.telephone)?;
        require_text("vehicle_model", &self.vehicle_model)?;
        require_some("date_reservation", self.date_reservation.as_ref())
    }
}

impl Resource for Reservation {
    type Draft = ReservationDraft;

    const ENDPOINT: Endpoint = showroom_api::endpoint::RESERVATIONS;
    const NAME: &'static str = "reservation";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_draft(&self) -> ReservationDraft {
        ReservationDraft {
            client_name: self.client_name.clone(),
            telephone: self.telephone.clone(),
            email: self.email.clone(),
            vehicle_model: self.vehicle_model.clone(),
            reservation_type: self.reservation_type.clone(),
            date_reservation: Some(self.date_reservation),
            date_retrait: self.date_retrait,
            status: self.status.clone(),
            notes: self.notes.clone(),
        }
    }
}

impl StatusResource for Reservation {
    type Status = ReservationStatus;

    fn status(&self) -> &ReservationStatus {
        &self.status
    }
}
