//! Domain types shared across the folio backend.
//!
//! - [`error`] -- the `CoreError` taxonomy used by every layer.
//! - [`username`] -- tenant username normalization and validation rules.
//! - [`settings`] -- registry of well-known site-setting keys, their
//!   default documents, and public-visibility flags.
//! - [`domain`] -- custom-domain verification state machine and the
//!   DNS record matcher.

pub mod domain;
pub mod error;
pub mod settings;
pub mod types;
pub mod username;
