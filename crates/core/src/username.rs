//! Tenant username rules: normalization, length, charset, reserved words.
//!
//! Usernames are lowercased once at registration, so every later lookup is
//! a plain equality match. Validation runs before any invite is consumed,
//! keeping a failed registration from burning a single-use token.

use crate::error::CoreError;

/// Minimum username length after trimming.
pub const MIN_USERNAME_LEN: usize = 3;

/// Maximum username length (matches the `VARCHAR(50)` column).
pub const MAX_USERNAME_LEN: usize = 50;

/// Names that collide with platform routes or would be misleading as a
/// public namespace. Checked against the normalized (lowercased) name.
const RESERVED_USERNAMES: &[&str] = &[
    "admin",
    "api",
    "app",
    "assets",
    "auth",
    "cv",
    "designs",
    "health",
    "login",
    "logout",
    "platform",
    "projects",
    "register",
    "root",
    "settings",
    "signup",
    "static",
    "superadmin",
    "support",
    "u",
    "www",
];

/// Lowercase a raw username for storage and lookup.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validate a raw username and return its normalized form.
///
/// Rules: at least [`MIN_USERNAME_LEN`] characters, ASCII alphanumerics
/// plus `-` and `_` only, and not a reserved platform word. Uniqueness is
/// enforced separately by the database (case-folded, since storage only
/// ever sees normalized names).
pub fn validate(raw: &str) -> Result<String, CoreError> {
    let normalized = normalize(raw);

    if normalized.len() < MIN_USERNAME_LEN {
        return Err(CoreError::Validation(format!(
            "Username must be at least {MIN_USERNAME_LEN} characters long"
        )));
    }
    if normalized.len() > MAX_USERNAME_LEN {
        return Err(CoreError::Validation(format!(
            "Username must be at most {MAX_USERNAME_LEN} characters long"
        )));
    }
    if !normalized
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CoreError::Validation(
            "Username may only contain letters, digits, '-' and '_'".to_string(),
        ));
    }
    if RESERVED_USERNAMES.contains(&normalized.as_str()) {
        return Err(CoreError::Validation(format!(
            "Username '{normalized}' is reserved"
        )));
    }

    Ok(normalized)
}
