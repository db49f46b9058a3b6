//! Shelf API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes, the
//! CSV importer) so integration tests and the binary entrypoint can both
//! access them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod importer;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
