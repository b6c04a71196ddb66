//! Site-setting entity model.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One per-tenant setting document from the `site_settings` table.
///
/// `key` is unique only within a tenant (`uq_site_settings_user_key`);
/// the value is an opaque JSON document.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Setting {
    pub id: DbId,
    pub key: String,
    pub value: serde_json::Value,
    pub user_id: DbId,
    pub updated_at: Timestamp,
}
