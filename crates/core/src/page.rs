//! Page kinds and page-level validation.
//!
//! Pages are stored in a single table tagged by [`PageKind`]; the per-kind
//! payload lives in the db crate's `PageBody`.

use serde::{Deserialize, Serialize};
use validator::ValidateUrl;

use crate::error::CoreError;
use crate::slug::slugify;

/// Maximum page title length (characters).
pub const MAX_TITLE_LEN: usize = 20;

/// Maximum redirect link length (characters).
pub const MAX_LINK_LEN: usize = 500;

/// Largest position an editor may assign.
pub const MAX_POSITION: i64 = i32::MAX as i64;

/// Slugs that would shadow a built-in route.
pub const RESERVED_SLUGS: &[&str] = &["admin", "contact", "comics", "media", "health"];

/// The concrete form of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Collection,
    Text,
    Redirect,
    Comic,
}

/// Order in which `/{slug}` tries to resolve a page. Comics are served under
/// `/comics/` and are not part of slug dispatch.
pub const DISPATCH_ORDER: [PageKind; 3] = [PageKind::Collection, PageKind::Text, PageKind::Redirect];

impl PageKind {
    /// All kinds, in display order.
    pub const ALL: [PageKind; 4] = [
        PageKind::Collection,
        PageKind::Text,
        PageKind::Redirect,
        PageKind::Comic,
    ];

    /// The value stored in the `pages.kind` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::Text => "text",
            Self::Redirect => "redirect",
            Self::Comic => "comic",
        }
    }

    /// Parse from the `pages.kind` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "collection" => Ok(Self::Collection),
            "text" => Ok(Self::Text),
            "redirect" => Ok(Self::Redirect),
            "comic" => Ok(Self::Comic),
            other => Err(CoreError::Internal(format!("Unknown page kind '{other}'"))),
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Collection => "Collection",
            Self::Text => "Text",
            Self::Redirect => "Redirect",
            Self::Comic => "Comic",
        }
    }

    /// Whether pages of this kind appear in the site navigation.
    pub fn in_navigation(self) -> bool {
        DISPATCH_ORDER.contains(&self)
    }
}

impl std::fmt::Display for PageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a page title and return the slug derived from it.
///
/// Rejects empty titles, titles longer than [`MAX_TITLE_LEN`], titles that
/// produce an empty slug, and titles whose slug is reserved for an internal
/// route.
pub fn validate_title(title: &str) -> Result<String, CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }

    let slug = slugify(trimmed);
    if slug.is_empty() {
        return Err(CoreError::Validation(format!(
            "The page title '{trimmed}' does not contain any URL-safe characters"
        )));
    }
    if RESERVED_SLUGS.contains(&slug.as_str()) {
        return Err(CoreError::Validation(format!(
            "The page title '{trimmed}' is reserved for internal use."
        )));
    }
    Ok(slug)
}

/// Validate a redirect target: an absolute http(s) URL of bounded length.
pub fn validate_link(link: &str) -> Result<(), CoreError> {
    let link = link.trim().to_string();
    if link.chars().count() > MAX_LINK_LEN {
        return Err(CoreError::Validation(format!(
            "Link must be at most {MAX_LINK_LEN} characters"
        )));
    }
    let is_http = link.starts_with("http://") || link.starts_with("https://");
    if !is_http || !link.validate_url() {
        return Err(CoreError::Validation(format!(
            "Link '{link}' is not a valid http(s) URL"
        )));
    }
    Ok(())
}

/// Validate a manual display position.
pub fn validate_position(position: i64) -> Result<(), CoreError> {
    if !(0..=MAX_POSITION).contains(&position) {
        return Err(CoreError::Validation(format!(
            "Position must be an integer between 0 and {MAX_POSITION}"
        )));
    }
    Ok(())
}
