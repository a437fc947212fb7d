//! Request extractors.
//!
//! - [`auth::RequireAdmin`] -- Requires a valid admin Bearer token.

pub mod auth;
