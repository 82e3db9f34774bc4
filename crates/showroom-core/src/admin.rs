// ── Admin panel ──
//
// Instantiates one `ResourceController` per managed resource over a
// single shared `ResourceClient`.

use showroom_api::ResourceClient;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::controller::{Outcome, ResourceController};
use crate::error::CoreError;
use crate::model::{Appointment, Article, Delivery, Photo, Reservation, Vehicle};

/// Per-resource outcome of [`AdminPanel::refresh_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub outcomes: Vec<(&'static str, Outcome)>,
}

impl RefreshReport {
    /// `true` when every list loaded.
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|(_, outcome)| outcome.is_done())
    }

    /// Names of the resources whose list failed to load.
    pub fn failed(&self) -> Vec<&'static str> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| !outcome.is_done())
            .map(|(name, _)| *name)
            .collect()
    }
}

/// Every admin screen's controller, sharing one HTTP client.
///
/// Controllers share nothing mutable: each has its own list, banner,
/// form, gate and in-flight guard.
#[derive(Clone)]
pub struct AdminPanel {
    client: ResourceClient,
    vehicles: ResourceController<Vehicle>,
    reservations: ResourceController<Reservation>,
    appointments: ResourceController<Appointment>,
    deliveries: ResourceController<Delivery>,
    photos: ResourceController<Photo>,
    articles: ResourceController<Article>,
}

impl AdminPanel {
    /// Build the shared client from `config`. Does NOT fetch anything.
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        let client = ResourceClient::new(config.url.as_str(), &config.transport())?;
        debug!(base_url = %client.base_url(), "admin panel client ready");
        Ok(Self::from_client(client))
    }

    /// Wrap an already configured client.
    pub fn from_client(client: ResourceClient) -> Self {
        Self {
            vehicles: ResourceController::new(client.clone()),
            reservations: ResourceController::new(client.clone()),
            appointments: ResourceController::new(client.clone()),
            deliveries: ResourceController::new(client.clone()),
            photos: ResourceController::new(client.clone()),
            articles: ResourceController::new(client.clone()),
            client,
        }
    }

    pub fn client(&self) -> &ResourceClient {
        &self.client
    }

    pub fn vehicles(&self) -> &ResourceController<Vehicle> {
        &self.vehicles
    }

    pub fn reservations(&self) -> &ResourceController<Reservation> {
        &self.reservations
    }

    pub fn appointments(&self) -> &ResourceController<Appointment> {
        &self.appointments
    }

    pub fn deliveries(&self) -> &ResourceController<Delivery> {
        &self.deliveries
    }

    pub fn photos(&self) -> &ResourceController<Photo> {
        &self.photos
    }

    pub fn articles(&self) -> &ResourceController<Article> {
        &self.articles
    }

    /// Load every list concurrently.
    pub async fn refresh_all(&self) -> RefreshReport {
        let (vehicles, reservations, appointments, deliveries, photos, articles) = tokio::join!(
            self.vehicles.load(),
            self.reservations.load(),
            self.appointments.load(),
            self.deliveries.load(),
            self.photos.load(),
            self.articles.load(),
        );

        let report = RefreshReport {
            outcomes: vec![
                ("vehicles", vehicles),
                ("reservations", reservations),
                ("appointments", appointments),
                ("deliveries", deliveries),
                ("photos", photos),
                ("articles", articles),
            ],
        };

        if report.is_complete() {
            debug!("full refresh complete");
        } else {
            warn!(failed = ?report.failed(), "full refresh incomplete");
        }
        report
    }
}
