// ── Photo gallery types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use showroom_api::Endpoint;

use super::entity_id::EntityId;
use super::require_text;
use crate::error::CoreError;
use crate::resource::{Draft, Resource};

pub const DEFAULT_CATEGORY: &str = "Général";
pub const DEFAULT_SOURCE_TYPE: &str = "Upload";

/// Gallery sections shown on the public site. The column is free text.
pub const CATEGORIES: [&str; 4] = ["Véhicules", "Services", "À propos", "Actualités"];

fn default_category() -> String {
    DEFAULT_CATEGORY.to_owned()
}

fn default_source_type() -> String {
    DEFAULT_SOURCE_TYPE.to_owned()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: EntityId,
    pub title: String,
    pub url: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Display size as stored (e.g. `"2.0 MB"`).
    #[serde(default)]
    pub file_size: Option<String>,
    #[serde(default = "default_source_type")]
    pub source_type: String,
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoDraft {
    pub title: String,
    pub url: String,
    pub category: String,
    pub alt_text: Option<String>,
    pub description: Option<String>,
    pub file_size: Option<String>,
    pub source_type: String,
}

impl Default for PhotoDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            url: String::new(),
            category: default_category(),
            alt_text: None,
            description: None,
            file_size: None,
            source_type: default_source_type(),
        }
    }
}

impl Draft for PhotoDraft {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title)?;
        require_text("url", &self.url)
    }
}

impl Resource for Photo {
    type Draft = PhotoDraft;

    const ENDPOINT: Endpoint = showroom_api::endpoint::PHOTOS;
    const NAME: &'static str = "photo";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_draft(&self) -> PhotoDraft {
        PhotoDraft {
            title: self.title.clone(),
            url: self.url.clone(),
            category: self.category.clone(),
            alt_text: self.alt_text.clone(),
            description: self.description.clone(),
            file_size: self.file_size.clone(),
            source_type: self.source_type.clone(),
        }
    }
}
