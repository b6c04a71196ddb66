//! Project entity model and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// One ordered gallery entry on a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryItem {
    /// Media kind, e.g. `"image"` or `"video"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
}

/// One external link on a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectLink {
    pub label: String,
    pub url: String,
}

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub tech_stack: Json<Vec<String>>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub gallery: Json<Vec<GalleryItem>>,
    pub github_link: Option<String>,
    pub live_url: Option<String>,
    pub links: Json<Vec<ProjectLink>>,
    pub featured: bool,
    /// Explicit display rank; ties broken by descending id.
    #[serde(rename = "order")]
    pub display_order: i32,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project. The owning tenant is never part of the
/// body; it always comes from the authenticated caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    #[serde(default)]
    pub gallery: Vec<GalleryItem>,
    pub github_link: Option<String>,
    pub live_url: Option<String>,
    #[serde(default)]
    pub links: Vec<ProjectLink>,
    #[serde(default)]
    pub featured: bool,
    #[serde(rename = "order", default)]
    pub display_order: i32,
}

/// DTO for updating an existing project. Only fields present in the
/// request are applied; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub gallery: Option<Vec<GalleryItem>>,
    pub github_link: Option<String>,
    pub live_url: Option<String>,
    pub links: Option<Vec<ProjectLink>>,
    pub featured: Option<bool>,
    #[serde(rename = "order")]
    pub display_order: Option<i32>,
}
