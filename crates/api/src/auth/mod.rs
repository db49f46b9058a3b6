//! Bearer token handling.
//!
//! - [`jwt`] -- JWT access-token generation and validation.
//!
//! Sessions are issued by the account service; this server only needs to
//! verify them. Token generation is kept for tooling and tests.

pub mod jwt;
