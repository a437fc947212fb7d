//! Server-rendered HTML for the public site.
//!
//! Every page shares [`base_document`]: the site title, description meta
//! tag, navigation and copyright footer come from the site settings.

use maud::{html, Markup, PreEscaped, DOCTYPE};
use pita_core::contact::{ContactForm, ContactStatus};
use pita_core::media::MediaStorage;
use pita_core::settings::{SettingKey, SiteSettings};
use pita_db::models::artwork::Artwork;
use pita_db::models::comic_page::{ComicNavigation, ComicPage};
use pita_db::models::page::{Page, PageBody};

const CSS: &str = "\
body{margin:0 auto;max-width:72rem;padding:1rem;font-family:sans-serif;color:#222}\
header nav a{margin-right:1rem}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(12rem,1fr));gap:1rem}\
.grid img{width:100%;height:auto;display:block}\
.message.success{color:#176117}.message.error{color:#8a1010}\
.comic img{max-width:100%}.comic nav a{margin:0 .5rem}\
form label{display:block;margin-top:.5rem}form input,form textarea{width:100%}\
footer{margin-top:2rem;font-size:.85rem;color:#666}";

/// Data every page needs for its chrome.
pub struct Layout<'a> {
    pub settings: &'a SiteSettings,
    /// Collections, text pages and redirects in display order.
    pub nav: &'a [Page],
    /// Whether to link the comics index.
    pub has_comics: bool,
    pub media: &'a MediaStorage,
}

impl Layout<'_> {
    fn page_title(&self, title: Option<&str>) -> String {
        match title {
            Some(title) => format!("{title} | {}", self.settings.title()),
            None => self.settings.title().to_string(),
        }
    }
}

fn base_document(layout: &Layout<'_>, title: Option<&str>, content: Markup) -> Markup {
    let settings = layout.settings;
    let description = settings.get(SettingKey::Description);
    let terms = settings.get(SettingKey::TermsOfServiceUrl);
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if !description.is_empty() {
                    meta name="description" content=(description);
                }
                meta name="author" content=(settings.get(SettingKey::Name));
                title { (layout.page_title(title)) }
                style { (PreEscaped(CSS)) }
            }
            body {
                header {
                    h1 { a href="/" { (settings.title()) } }
                    (site_nav(layout))
                }
                main { (content) }
                footer {
                    "© " (settings.get(SettingKey::CopyrightYears)) " " (settings.get(SettingKey::Name))
                    @if !terms.is_empty() {
                        " · " a href=(terms) { "Terms of Service" }
                    }
                }
            }
        }
    }
}

fn site_nav(layout: &Layout<'_>) -> Markup {
    html! {
        nav {
            @for page in layout.nav {
                a href=(page.url()) { (page.title) }
            }
            @if layout.has_comics {
                a href="/comics/" { "Comics" }
            }
            a href="/contact/" { (layout.settings.get(SettingKey::ContactTitle)) }
        }
    }
}

fn artwork_grid(media: &MediaStorage, artworks: &[Artwork]) -> Markup {
    html! {
        div.grid {
            @for artwork in artworks {
                @let summary = artwork.summary();
                a href=(media.url(&artwork.image)) title=(summary) {
                    img src=(media.url(&artwork.thumbnail)) alt=(summary) loading="lazy";
                }
            }
        }
    }
}

/// Home page: every artwork as a thumbnail grid.
pub fn index(layout: &Layout<'_>, artworks: &[Artwork]) -> Markup {
    base_document(layout, None, artwork_grid(layout.media, artworks))
}

/// A collection and its artworks.
pub fn collection(layout: &Layout<'_>, page: &Page, artworks: &[Artwork]) -> Markup {
    let content = html! {
        h2 { (page.title) }
        @if !page.description().is_empty() {
            p.description { (page.description()) }
        }
        (artwork_grid(layout.media, artworks))
    };
    base_document(layout, Some(&page.title), content)
}

/// A text page with its cached markdown rendering.
pub fn text(layout: &Layout<'_>, page: &Page) -> Markup {
    let html = match &page.body {
        PageBody::Text { html, .. } => html.as_str(),
        _ => "",
    };
    let content = html! {
        h2 { (page.title) }
        article { (PreEscaped(html)) }
    };
    base_document(layout, Some(&page.title), content)
}

/// The contact form, with the outcome of the last submission if any.
///
/// Fields are refilled from `form` unless the message was sent.
pub fn contact(layout: &Layout<'_>, form: &ContactForm, status: Option<ContactStatus>) -> Markup {
    let settings = layout.settings;
    let title = settings.get(SettingKey::ContactTitle);
    let description = settings.get(SettingKey::ContactDescription);
    let empty = ContactForm::default();
    let values = if status.is_some_and(ContactStatus::is_success) {
        &empty
    } else {
        form
    };

    let content = html! {
        h2 { (title) }
        @if !description.is_empty() {
            p.description { (description) }
        }
        @if let Some(status) = status {
            p class={ "message " (status.level()) } { (status.message(settings)) }
        }
        form method="post" action="/contact/" {
            label for="name" { "Name" }
            input #name type="text" name="name" value=(values.name) required;
            label for="from_email" { "Email" }
            input #from_email type="email" name="from_email" value=(values.from_email) required;
            label for="subject" { "Subject" }
            input #subject type="text" name="subject" value=(values.subject) required;
            label for="message" { "Message" }
            textarea #message name="message" rows="8" required { (values.message) }
            button type="submit" { "Send" }
        }
    };
    base_document(layout, Some(title), content)
}

/// Index of comics.
pub fn comics(layout: &Layout<'_>, comics: &[Page]) -> Markup {
    let content = html! {
        h2 { "Comics" }
        ul {
            @for comic in comics {
                li {
                    a href=(comic.url()) { (comic.title) }
                    @if !comic.description().is_empty() {
                        ": " (comic.description())
                    }
                }
            }
        }
    };
    base_document(layout, Some("Comics"), content)
}

fn comic_link(comic: &Page, number: Option<i64>, label: &str) -> Markup {
    html! {
        @match number {
            Some(number) => a href={ (comic.url()) "/" (number) } { (label) },
            None => span { (label) },
        }
    }
}

/// One page of a comic with reader navigation.
pub fn comic_page(
    layout: &Layout<'_>,
    comic: &Page,
    page: &ComicPage,
    navigation: &ComicNavigation,
) -> Markup {
    let heading = if page.title.is_empty() {
        format!("{} #{}", comic.title, page.number)
    } else {
        format!("{} #{}: {}", comic.title, page.number, page.title)
    };
    let content = html! {
        div.comic {
            h2 { (heading) }
            img src=(layout.media.url(&page.image)) alt=(heading) width=(page.width) height=(page.height);
            nav {
                (comic_link(comic, navigation.first, "First"))
                (comic_link(comic, navigation.prev, "Previous"))
                (comic_link(comic, navigation.next, "Next"))
                (comic_link(comic, navigation.last, "Last"))
            }
        }
    };
    base_document(layout, Some(&comic.title), content)
}

pub fn not_found(layout: &Layout<'_>) -> Markup {
    let content = html! {
        h2 { "Page not found" }
        p { a href="/" { "Back to the front page" } }
    };
    base_document(layout, Some("Not found"), content)
}
