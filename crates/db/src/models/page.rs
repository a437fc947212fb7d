//! Page entity model and DTOs.
//!
//! All page kinds share the `pages` table. [`PageRow`] mirrors the table;
//! [`Page`] is the typed form with the per-kind payload in [`PageBody`].

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use pita_core::error::CoreError;
use pita_core::page::{validate_link, validate_position, validate_title, PageKind};
use pita_core::types::{DbId, Timestamp};

/// A row from the `pages` table.
#[derive(Debug, Clone, FromRow)]
pub struct PageRow {
    pub id: DbId,
    pub kind: String,
    pub title: String,
    pub slug: String,
    pub position: i64,
    pub description: Option<String>,
    pub content: Option<String>,
    pub html: Option<String>,
    pub link: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Per-kind page payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageBody {
    Collection { description: String },
    /// Markdown source plus the HTML rendered from it on the last save.
    Text { content: String, html: String },
    Redirect { link: String },
    Comic { description: String },
}

impl PageBody {
    pub fn kind(&self) -> PageKind {
        match self {
            Self::Collection { .. } => PageKind::Collection,
            Self::Text { .. } => PageKind::Text,
            Self::Redirect { .. } => PageKind::Redirect,
            Self::Comic { .. } => PageKind::Comic,
        }
    }
}

/// A page of any kind.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub position: i64,
    #[serde(flatten)]
    pub body: PageBody,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Page {
    pub fn kind(&self) -> PageKind {
        self.body.kind()
    }

    /// Public URL of the page.
    pub fn url(&self) -> String {
        match self.kind() {
            PageKind::Comic => format!("/comics/{}", self.slug),
            _ => format!("/{}", self.slug),
        }
    }

    /// Description for collections and comics, empty otherwise.
    pub fn description(&self) -> &str {
        match &self.body {
            PageBody::Collection { description } | PageBody::Comic { description } => description,
            _ => "",
        }
    }
}

impl TryFrom<PageRow> for Page {
    type Error = CoreError;

    fn try_from(row: PageRow) -> Result<Self, Self::Error> {
        let body = match PageKind::from_name(&row.kind)? {
            PageKind::Collection => PageBody::Collection {
                description: row.description.unwrap_or_default(),
            },
            PageKind::Text => PageBody::Text {
                content: row.content.unwrap_or_default(),
                html: row.html.unwrap_or_default(),
            },
            PageKind::Redirect => PageBody::Redirect {
                link: row.link.unwrap_or_default(),
            },
            PageKind::Comic => PageBody::Comic {
                description: row.description.unwrap_or_default(),
            },
        };
        Ok(Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            position: row.position,
            body,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Page list entry for the admin API.
#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    #[serde(flatten)]
    pub page: Page,
    /// Number of artworks in a collection; zero for other kinds.
    pub artwork_count: i64,
}

/// Per-kind payload when creating a page.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NewPageBody {
    Collection {
        #[serde(default)]
        description: String,
    },
    Text {
        #[serde(default)]
        content: String,
    },
    Redirect {
        link: String,
    },
    Comic {
        #[serde(default)]
        description: String,
    },
}

impl NewPageBody {
    pub fn kind(&self) -> PageKind {
        match self {
            Self::Collection { .. } => PageKind::Collection,
            Self::Text { .. } => PageKind::Text,
            Self::Redirect { .. } => PageKind::Redirect,
            Self::Comic { .. } => PageKind::Comic,
        }
    }
}

/// DTO for creating a page.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePage {
    pub title: String,
    #[serde(default)]
    pub position: i64,
    #[serde(flatten)]
    pub body: NewPageBody,
}

impl CreatePage {
    /// Check title, position and kind-specific fields.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_title(&self.title)?;
        validate_position(self.position)?;
        if let NewPageBody::Redirect { link } = &self.body {
            validate_link(link)?;
        }
        Ok(())
    }
}

/// DTO for updating a page. All fields are optional; the kind is fixed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePage {
    pub title: Option<String>,
    pub position: Option<i64>,
    /// Collections and comics.
    pub description: Option<String>,
    /// Text pages.
    pub content: Option<String>,
    /// Redirects.
    pub link: Option<String>,
}

impl UpdatePage {
    /// Check the supplied fields against the kind of the page being edited.
    pub fn validate(&self, kind: PageKind) -> Result<(), CoreError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(position) = self.position {
            validate_position(position)?;
        }

        let misplaced = match kind {
            PageKind::Collection | PageKind::Comic => {
                [("content", self.content.is_some()), ("link", self.link.is_some())]
            }
            PageKind::Text => [
                ("description", self.description.is_some()),
                ("link", self.link.is_some()),
            ],
            PageKind::Redirect => [
                ("description", self.description.is_some()),
                ("content", self.content.is_some()),
            ],
        };
        if let Some((field, _)) = misplaced.iter().find(|(_, present)| *present) {
            return Err(CoreError::Validation(format!(
                "Field '{field}' does not apply to {} pages",
                kind.as_str()
            )));
        }

        if let Some(link) = &self.link {
            validate_link(link)?;
        }
        Ok(())
    }
}
