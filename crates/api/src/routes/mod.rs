//! Route tree.
//!
//! ```text
//! /health      JSON health check
//! /admin/...   admin JSON API (see [`admin::router`])
//! /media/...   uploaded files (served by the router)
//! /...         public site (see [`site::router`])
//! ```

pub mod admin;
pub mod health;
pub mod site;
