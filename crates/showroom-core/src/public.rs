// ── Public site client ──
//
// Catalog browsing and the two customer-facing submission forms. These
// endpoints take camelCase bodies; the backend fills in the initial
// status and the reservation date.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use showroom_api::endpoint::{CATALOG, SUBMIT_APPOINTMENT, SUBMIT_RESERVATION};
use showroom_api::{ResourceClient, Saved};
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::model::clock::hh_mm_opt;
use crate::model::{
    Appointment, AppointmentType, Reservation, Vehicle, require_some, require_text,
};

/// Reservation form submitted from the catalog page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub client_name: String,
    pub telephone: String,
    pub email: Option<String>,
    pub vehicle_model: String,
    pub reservation_type: Option<String>,
    pub date_retrait: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl ReservationRequest {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("clientName", &self.client_name)?;
        require_text("telephone", &self.telephone)?;
        require_text("vehicleModel", &self.vehicle_model)
    }
}

/// Appointment form submitted from the services page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub client_name: String,
    pub telephone: String,
    pub email: Option<String>,
    pub appointment_type: AppointmentType,
    pub date_appointment: Option<NaiveDate>,
    #[serde(with = "hh_mm_opt")]
    pub time_appointment: Option<NaiveTime>,
    pub service_type: Option<String>,
    pub vehicle_model: Option<String>,
    pub notes: Option<String>,
}

impl AppointmentRequest {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("clientName", &self.client_name)?;
        require_text("telephone", &self.telephone)?;
        require_some("dateAppointment", self.date_appointment.as_ref())?;
        require_some("timeAppointment", self.time_appointment.as_ref())
    }
}

/// Unauthenticated customer-facing operations.
#[derive(Clone)]
pub struct PublicSite {
    client: ResourceClient,
}

impl PublicSite {
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        let client = ResourceClient::new(config.url.as_str(), &config.transport())?;
        Ok(Self::from_client(client))
    }

    pub fn from_client(client: ResourceClient) -> Self {
        Self { client }
    }

    /// Vehicles currently in stock, in catalog order.
    pub async fn catalog(&self) -> Result<Vec<Vehicle>, CoreError> {
        let listing = self.client.list::<Vehicle>(&CATALOG).await?;
        let total = listing.items.len();
        let available: Vec<Vehicle> = listing.items.into_iter().filter(|v| v.in_stock).collect();
        debug!(total, available = available.len(), "catalog loaded");
        Ok(available)
    }

    pub async fn submit_reservation(
        &self,
        request: &ReservationRequest,
    ) -> Result<Saved<Reservation>, CoreError> {
        request.validate()?;
        let saved = self
            .client
            .create::<Reservation, _>(&SUBMIT_RESERVATION, request)
            .await?;
        info!(id = %saved.item.id, "reservation submitted");
        Ok(saved)
    }

    pub async fn submit_appointment(
        &self,
        request: &AppointmentRequest,
    ) -> Result<Saved<Appointment>, CoreError> {
        request.validate()?;
        let saved = self
            .client
            .create::<Appointment, _>(&SUBMIT_APPOINTMENT, request)
            .await?;
        info!(id = %saved.item.id, "appointment submitted");
        Ok(saved)
    }
}
