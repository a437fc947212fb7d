//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` (or an open transaction) as the first argument.

pub mod artwork_repo;
pub mod comic_page_repo;
pub mod page_repo;
pub mod position_repo;
pub mod setting_repo;

pub use artwork_repo::ArtworkRepo;
pub use comic_page_repo::ComicPageRepo;
pub use page_repo::PageRepo;
pub use position_repo::{Partition, PositionRepo};
pub use setting_repo::SettingRepo;
