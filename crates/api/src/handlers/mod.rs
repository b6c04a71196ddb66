//! HTTP handlers, grouped by resource.

pub mod auth;
pub mod designs;
pub mod domain;
pub mod invites;
pub mod projects;
pub mod public;
pub mod settings;
