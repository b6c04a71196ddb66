//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods that must run
//! inside the registration transaction take `&mut PgConnection` instead.
//!
//! Every resource query is tenant-scoped: the WHERE clause always pins
//! `user_id` to the caller's tenant, so a foreign id and a missing id are
//! indistinguishable (`None` either way).

pub mod design_work_repo;
pub mod invite_repo;
pub mod project_repo;
pub mod setting_repo;
pub mod user_repo;

pub use design_work_repo::DesignWorkRepo;
pub use invite_repo::InviteRepo;
pub use project_repo::ProjectRepo;
pub use setting_repo::SettingRepo;
pub use user_repo::UserRepo;
