//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Methods that only read or write one table take `&PgPool`. Methods the CSV
//! importer composes into a per-row transaction take `&mut PgConnection`
//! instead, so callers can pass `&mut *tx`.

pub mod asset_repo;
pub mod category_repo;
pub mod custom_field_repo;
pub mod location_repo;
pub mod organization_repo;
pub mod tag_repo;
pub mod user_repo;

pub use asset_repo::AssetRepo;
pub use category_repo::CategoryRepo;
pub use custom_field_repo::CustomFieldRepo;
pub use location_repo::LocationRepo;
pub use organization_repo::OrganizationRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;

/// How many times a find-or-create retries when the conflicting row it
/// collided with disappears before it can be read (the other writer rolled
/// back).
pub(crate) const FIND_OR_CREATE_ATTEMPTS: usize = 3;
