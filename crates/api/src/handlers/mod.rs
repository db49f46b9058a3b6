pub mod asset_import;
pub mod assets;
pub mod categories;
pub mod custom_fields;
pub mod locations;
