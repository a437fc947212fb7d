//! Request handlers.
//!
//! Public views render HTML through [`crate::templates`]; admin handlers
//! return JSON wrapped in [`crate::response::DataResponse`].

pub mod artworks;
pub mod auth;
pub mod comic_pages;
pub mod comics;
pub mod contact;
pub mod dashboard;
pub mod pages;
pub mod settings;
pub mod site;
pub mod upload;
pub mod views;
