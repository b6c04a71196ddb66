//! Design-work entity model and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A design-work row from the `design_works` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DesignWork {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// Open string set: `logo`, `branding`, `ui`, `print`, ...
    pub category: String,
    pub images: Json<Vec<String>>,
    /// Index into `images` for the thumbnail. Out-of-range values are
    /// stored as-is; renderers degrade to "no primary".
    pub primary_image: i32,
    pub video_urls: Json<Vec<String>>,
    pub client: Option<String>,
    pub year: Option<i32>,
    pub featured: bool,
    #[serde(rename = "order")]
    pub display_order: i32,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DesignWork {
    /// Resolve the primary image URL, or `None` when the stored index
    /// does not point into `images`.
    pub fn primary_image_url(&self) -> Option<&str> {
        usize::try_from(self.primary_image)
            .ok()
            .and_then(|idx| self.images.0.get(idx))
            .map(String::as_str)
    }
}

/// DTO for creating a design work. Tenant id comes from the caller's
/// token, never the body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDesignWork {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub primary_image: i32,
    #[serde(default)]
    pub video_urls: Vec<String>,
    pub client: Option<String>,
    pub year: Option<i32>,
    #[serde(default)]
    pub featured: bool,
    #[serde(rename = "order", default)]
    pub display_order: i32,
}

/// DTO for updating a design work. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDesignWork {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub images: Option<Vec<String>>,
    pub primary_image: Option<i32>,
    pub video_urls: Option<Vec<String>>,
    pub client: Option<String>,
    pub year: Option<i32>,
    pub featured: Option<bool>,
    #[serde(rename = "order")]
    pub display_order: Option<i32>,
}
