//! Domain types and pure logic for the shelf asset service.
//!
//! Nothing in this crate touches the database or the network; the CSV
//! import pipeline's reader and extractors live here so they can be
//! exercised directly by unit tests.

pub mod asset_import;
pub mod asset_status;
pub mod colors;
pub mod error;
pub mod organization;
pub mod pagination;
pub mod tier;
pub mod types;
