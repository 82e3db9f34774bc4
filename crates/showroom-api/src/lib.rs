// showroom-api: Async Rust client for the showroom serverless resource endpoints

pub mod client;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod transport;

pub use client::{ResourceClient, validate_id};
pub use endpoint::Endpoint;
pub use envelope::{BulkOutcome, Deleted, Listing, Saved};
pub use error::Error;
pub use transport::{DEFAULT_TIMEOUT, TlsMode, TransportConfig};
