//! Domain logic for the pita portfolio site.
//!
//! Everything here is free of HTTP and SQL concerns so it can be unit tested
//! in isolation and shared by the repository and API layers.

pub mod contact;
pub mod error;
pub mod imaging;
pub mod markdown;
pub mod media;
pub mod naming;
pub mod page;
pub mod position;
pub mod settings;
pub mod slug;
pub mod types;
