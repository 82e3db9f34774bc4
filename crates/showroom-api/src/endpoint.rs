// Static descriptors for the serverless resource endpoints.

/// Where a resource lives and how its bodies are keyed.
///
/// `collection_key` names the array in list responses
/// (`{ "appointments": [...] }`), `item_key` names the saved row in
/// mutation responses (`{ "success": true, "appointment": {...} }`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub path: &'static str,
    pub collection_key: &'static str,
    pub item_key: &'static str,
}

impl Endpoint {
    pub const fn new(
        path: &'static str,
        collection_key: &'static str,
        item_key: &'static str,
    ) -> Self {
        Self {
            path,
            collection_key,
            item_key,
        }
    }
}

// ── Admin resources ─────────────────────────────────────────────────

pub const VEHICLES: Endpoint = Endpoint::new("manage-vehicles", "vehicles", "vehicle");
pub const RESERVATIONS: Endpoint =
    Endpoint::new("manage-reservations", "reservations", "reservation");
pub const APPOINTMENTS: Endpoint =
    Endpoint::new("manage-appointments", "appointments", "appointment");
pub const DELIVERIES: Endpoint = Endpoint::new("manage-deliveries", "deliveries", "delivery");
pub const PHOTOS: Endpoint = Endpoint::new("manage-photos", "photos", "photo");
pub const ARTICLES: Endpoint = Endpoint::new("manage-articles", "articles", "article");

// ── Public site ─────────────────────────────────────────────────────

pub const CATALOG: Endpoint = Endpoint::new("get-vehicles", "vehicles", "vehicle");
pub const SUBMIT_RESERVATION: Endpoint =
    Endpoint::new("submit-reservation", "reservations", "reservation");
pub const SUBMIT_APPOINTMENT: Endpoint =
    Endpoint::new("submit-appointment", "appointments", "appointment");
