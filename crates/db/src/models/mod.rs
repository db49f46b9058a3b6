//! Database row structs and DTOs, one module per table family.

pub mod asset;
pub mod category;
pub mod custom_field;
pub mod location;
pub mod organization;
pub mod tag;
pub mod user;
