// ── Appointment domain types ──

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use showroom_api::Endpoint;

use super::clock::{hh_mm, hh_mm_opt};
use super::entity_id::EntityId;
use super::{require_some, require_text};
use crate::error::CoreError;
use crate::resource::{Draft, Resource, StatusResource};

define_text_enum! {
    /// What the customer is coming in for.
    AppointmentType {
        #[default]
        TestRide => "Essai véhicule",
        Livraison => "Livraison",
        Formation => "Formation",
        Maintenance => "Maintenance",
        Consultation => "Consultation",
        Autre => "Autre",
    }
}

define_text_enum! {
    /// Appointment lifecycle. New appointments start as `Programmé`.
    AppointmentStatus {
        #[default]
        Scheduled => "Programmé",
        Confirmed => "Confirmé",
        InProgress => "En cours",
        Completed => "Terminé",
        Cancelled => "Annulé",
        Postponed => "Reporté",
    }
}

/// A service or test-ride appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: EntityId,
    pub client_name: String,
    #[serde(default)]
    pub telephone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub appointment_type: AppointmentType,
    pub date_appointment: NaiveDate,
    #[serde(with = "hh_mm")]
    pub time_appointment: NaiveTime,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub vehicle_model: Option<String>,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppointmentDraft {
    pub client_name: String,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub appointment_type: AppointmentType,
    pub date_appointment: Option<NaiveDate>,
    #[serde(default, with = "hh_mm_opt")]
    pub time_appointment: Option<NaiveTime>,
    pub service_type: Option<String>,
    pub vehicle_model: Option<String>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

impl Draft for AppointmentDraft {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("client_name", &self.client_name)?;
        require_some("date_appointment", self.date_appointment.as_ref())?;
        require_some("time_appointment", self.time_appointment.as_ref())
    }
}

impl Resource for Appointment {
    type Draft = AppointmentDraft;

    const ENDPOINT: Endpoint = showroom_api::endpoint::APPOINTMENTS;
    const NAME: &'static str = "appointment";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_draft(&self) -> AppointmentDraft {
        AppointmentDraft {
            client_name: self.client_name.clone(),
            telephone: self.telephone.clone(),
            email: self.email.clone(),
            appointment_type: self.appointment_type.clone(),
            date_appointment: Some(self.date_appointment),
            time_appointment: Some(self.time_appointment),
            service_type: self.service_type.clone(),
            vehicle_model: self.vehicle_model.clone(),
            status: self.status.clone(),
            notes: self.notes.clone(),
        }
    }
}

impl StatusResource for Appointment {
    type Status = AppointmentStatus;

    fn status(&self) -> &AppointmentStatus {
        &self.status
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_datastore_row() {
        let row: Appointment = serde_json::from_value(json!({
            "id": 3,
            "client_name": "Jean Dupont",
            "telephone": "0601020304",
            "email": null,
            "appointment_type": "Essai véhicule",
            "date_appointment": "2025-01-10",
            "time_appointment": "09:00:00",
            "status": "Programmé",
            "created_at": "2025-01-02T10:00:00.123456+00:00",
            "updated_at": "2025-01-02T10:00:00.123456+00:00"
        }))
        .unwrap();

        assert_eq!(row.id.get(), 3);
        assert_eq!(row.appointment_type, AppointmentType::TestRide);
        assert_eq!(row.time_appointment, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(row.status, AppointmentStatus::Scheduled);
        assert!(row.service_type.is_none());
    }

    #[test]
    fn draft_serializes_wire_strings() {
        let draft = AppointmentDraft {
            client_name: "Jean Dupont".into(),
            date_appointment: NaiveDate::from_ymd_opt(2025, 1, 10),
            time_appointment: NaiveTime::from_hms_opt(9, 0, 0),
            ..AppointmentDraft::default()
        };
        let body = serde_json::to_value(&draft).unwrap();

        assert_eq!(body["appointment_type"], "Essai véhicule");
        assert_eq!(body["date_appointment"], "2025-01-10");
        assert_eq!(body["time_appointment"], "09:00");
        assert_eq!(body["status"], "Programmé");
        assert!(body.get("id").is_none());
        assert!(body.get("created_at").is_none());
    }

    #[test]
    fn draft_requires_name_date_and_time() {
        let mut draft = AppointmentDraft {
            client_name: "Jean".into(),
            ..AppointmentDraft::default()
        };
        assert!(matches!(
            draft.validate(),
            Err(CoreError::MissingField {
                field: "date_appointment"
            })
        ));

        draft.date_appointment = NaiveDate::from_ymd_opt(2025, 1, 10);
        draft.time_appointment = NaiveTime::from_hms_opt(14, 30, 0);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn status_labels_parse_and_display() {
        assert_eq!(AppointmentStatus::Confirmed.to_string(), "Confirmé");
        assert_eq!(
            "Reporté".parse::<AppointmentStatus>().unwrap(),
            AppointmentStatus::Postponed
        );
    }

    #[test]
    fn unknown_labels_are_kept_verbatim() {
        let row: Appointment = serde_json::from_value(json!({
            "id": 8,
            "client_name": "Moussa Sow",
            "appointment_type": "Urgence",
            "date_appointment": "2025-01-11",
            "time_appointment": "10:00",
            "status": "En attente de pièce"
        }))
        .unwrap();

        assert_eq!(row.appointment_type, AppointmentType::Other("Urgence".into()));
        assert_eq!(row.status.as_str(), "En attente de pièce");

        let body = serde_json::to_value(row.to_draft()).unwrap();
        assert_eq!(body["appointment_type"], "Urgence");
        assert_eq!(body["status"], "En attente de pièce");
    }
}
