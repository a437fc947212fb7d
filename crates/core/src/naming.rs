//! Storage path conventions for uploaded media.
//!
//! Artwork files are named after their primary key, which only exists after
//! the row is inserted. New uploads are therefore written under a random
//! temporary name first and renamed once the id is known.
//!
//! | File | Path |
//! |---|---|
//! | Artwork image | `artworks/{id:04}.{ext}` |
//! | Artwork thumbnail | `artworks/thumb/{id:04}.jpg` |
//! | Comic page | `comics/{comic_slug}/{number}.{ext}` |

use uuid::Uuid;

use crate::error::CoreError;
use crate::types::DbId;

/// Directory (relative to the media root) holding artwork images.
pub const ARTWORK_DIR: &str = "artworks";

/// Directory (relative to the media root) holding artwork thumbnails.
pub const THUMBNAIL_DIR: &str = "artworks/thumb";

/// Directory (relative to the media root) holding comic pages.
pub const COMIC_DIR: &str = "comics";

/// Thumbnails are always JPEG.
pub const THUMBNAIL_EXTENSION: &str = "jpg";

/// Upload extensions accepted for artworks and comic pages.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Extract and validate the lowercase extension of an uploaded file name.
pub fn upload_extension(filename: &str) -> Result<String, CoreError> {
    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported image format '.{ext}'. Supported: {}",
            SUPPORTED_IMAGE_EXTENSIONS
                .iter()
                .map(|e| format!(".{e}"))
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }
}

/// Key-based stem: the id zero-padded to four digits.
pub fn key_stem(id: DbId) -> String {
    format!("{id:04}")
}

/// Final artwork image path for a saved row.
pub fn artwork_image_path(id: DbId, ext: &str) -> String {
    format!("{ARTWORK_DIR}/{}.{ext}", key_stem(id))
}

/// Final artwork thumbnail path for a saved row.
pub fn artwork_thumbnail_path(id: DbId) -> String {
    format!("{THUMBNAIL_DIR}/{}.{THUMBNAIL_EXTENSION}", key_stem(id))
}

/// Temporary image and thumbnail paths for files staged before their row is
/// written: new artworks with no id yet, and replacement images.
///
/// Both share one random stem so a failed upload is easy to trace.
pub fn temporary_artwork_paths(ext: &str) -> (String, String) {
    let stem = Uuid::new_v4();
    (
        format!("{ARTWORK_DIR}/{stem}.{ext}"),
        format!("{THUMBNAIL_DIR}/{stem}.{THUMBNAIL_EXTENSION}"),
    )
}

/// Storage path of a comic page image.
pub fn comic_page_path(comic_slug: &str, number: i64, ext: &str) -> String {
    format!("{COMIC_DIR}/{comic_slug}/{number}.{ext}")
}

/// Base name of a stored path (`artworks/0007.png` -> `0007.png`).
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Extension of a stored path, without the dot.
pub fn stored_extension(path: &str) -> &str {
    let name = file_name(path);
    match name.rsplit_once('.') {
        Some((_, ext)) => ext,
        None => "",
    }
}
