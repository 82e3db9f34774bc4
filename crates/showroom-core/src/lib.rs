//! Reactive CRUD layer between `showroom-api` and the admin panel UI.
//!
//! This crate owns the domain model and the client-side synchronization
//! pattern shared by every admin screen:
//!
//! - **[`ResourceController<R>`]**: One generic controller per resource.
//!   Holds the cached list, an operation state machine
//!   (`Idle` / `Listing` / `Submitting` / `Deleting`), a dismissible error
//!   [`Banner`], the edit form and the [`DeleteGate`]. A single atomic
//!   in-flight guard drops (never queues) a second mutation. Every
//!   mutation ends with a full reload of the list.
//!
//! - **[`AdminPanel`]**: Builds one shared `ResourceClient` and a
//!   controller per resource; [`refresh_all()`](AdminPanel::refresh_all)
//!   loads every list concurrently.
//!
//! - **[`PublicSite`]**: In-stock catalog and the customer-facing
//!   reservation / appointment submissions.
//!
//! - **[`ListSubscription<R>`]**: Subscription handle vended by a
//!   controller. Yields a [`ListView`] (rows, operation state and banner
//!   together) through `view()` / `changed()` or as a `Stream`.
//!
//! - **Domain model** ([`model`]): `Vehicle`, `Reservation`,
//!   `Appointment`, `Delivery`, `Photo`, `Article` and their drafts, with
//!   [`EntityId`] accepting only positive identifiers.
//!
//! Errors are classified into [`ErrorKind`] by HTTP status and structured
//! backend code, never by message text.

pub mod admin;
pub mod config;
pub mod controller;
pub mod error;
pub mod gate;
pub mod model;
pub mod public;
pub mod resource;
pub mod stream;

mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use admin::{AdminPanel, RefreshReport};
pub use config::{ClientConfig, TlsVerification};
pub use controller::{Banner, FormState, OperationState, Outcome, ResourceController, SubmitKind};
pub use error::{CoreError, ErrorKind};
pub use gate::DeleteGate;
pub use public::{AppointmentRequest, PublicSite, ReservationRequest};
pub use resource::{Draft, Resource, StatusResource};
pub use stream::{ListSubscription, ListView};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Appointment, AppointmentDraft, AppointmentStatus, AppointmentType, Article, ArticleDraft,
    ArticleStatus, Delivery, DeliveryDraft, DeliveryStatus, EntityId, InvalidEntityId, Photo,
    PhotoDraft, Reservation, ReservationDraft, ReservationStatus, Vehicle, VehicleCategory,
    VehicleDraft,
};
