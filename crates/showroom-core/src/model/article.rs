// ── News article types ──

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use showroom_api::Endpoint;

use super::entity_id::EntityId;
use super::{null_as_default, require_text};
use crate::error::CoreError;
use crate::resource::{Draft, Resource, StatusResource};

define_text_enum! {
    /// Publication state. The backend stamps `publish_date` on `Publié`.
    ArticleStatus {
        #[default]
        Brouillon => "Brouillon",
        Published => "Publié",
        Archived => "Archivé",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: EntityId,
    pub title: String,
    pub category: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub status: ArticleStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub publish_date: Option<NaiveDate>,
    #[serde(default)]
    pub last_modified: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `publish_date` and `last_modified` are maintained by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    pub category: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub status: ArticleStatus,
    pub tags: Vec<String>,
    pub featured_image: Option<String>,
}

impl Draft for ArticleDraft {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title)?;
        require_text("category", &self.category)?;
        require_text("content", &self.content)
    }
}

impl Resource for Article {
    type Draft = ArticleDraft;

    const ENDPOINT: Endpoint = showroom_api::endpoint::ARTICLES;
    const NAME: &'static str = "article";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_draft(&self) -> ArticleDraft {
        ArticleDraft {
            title: self.title.clone(),
            category: self.category.clone(),
            content: self.content.clone(),
            excerpt: self.excerpt.clone(),
            author: self.author.clone(),
            status: self.status.clone(),
            tags: self.tags.clone(),
            featured_image: self.featured_image.clone(),
        }
    }
}

impl StatusResource for Article {
    type Status = ArticleStatus;

    fn status(&self) -> &ArticleStatus {
        &self.status
    }
}
