//! Invite entity model.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A single-use registration token from the `invites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invite {
    pub id: DbId,
    pub token: String,
    /// Creating tenant; NULL for system-issued invites.
    pub created_by: Option<DbId>,
    /// Consuming tenant, set exactly once.
    pub used_by: Option<DbId>,
    pub created_at: Timestamp,
    pub expires_at: Option<Timestamp>,
    pub used_at: Option<Timestamp>,
}

impl Invite {
    /// Whether the invite can still be consumed right now.
    pub fn is_usable(&self, now: Timestamp) -> bool {
        self.used_at.is_none() && self.expires_at.map_or(true, |exp| exp > now)
    }
}
