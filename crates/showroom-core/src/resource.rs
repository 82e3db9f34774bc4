// ── Resource abstraction ──
//
// Binds an entity type to its endpoint and draft type so that one
// generic controller serves every admin screen.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use showroom_api::Endpoint;

use crate::error::CoreError;
use crate::model::EntityId;

/// Create/update body for a resource. Also the form state while editing.
pub trait Draft: fmt::Debug + Clone + Default + PartialEq + Serialize + Send + Sync + 'static {
    /// Local pre-check run before any network call.
    fn validate(&self) -> Result<(), CoreError>;
}

/// A managed entity served by one serverless endpoint.
pub trait Resource: fmt::Debug + Clone + Send + Sync + DeserializeOwned + 'static {
    type Draft: Draft;

    const ENDPOINT: Endpoint;

    /// Singular, human-readable name used in messages (`"appointment"`).
    const NAME: &'static str;

    fn id(&self) -> EntityId;

    /// Prefill an edit form from a stored row.
    fn to_draft(&self) -> Self::Draft;
}

/// A resource with a status column that supports bulk status changes.
pub trait StatusResource: Resource {
    type Status: fmt::Debug + Clone + PartialEq + Serialize + Send + Sync + 'static;

    fn status(&self) -> &Self::Status;
}
