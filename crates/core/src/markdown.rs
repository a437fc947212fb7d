//! Markdown rendering for text pages.

use pulldown_cmark::{html, Options, Parser};

/// Render markdown `content` to an HTML fragment.
///
/// Tables, strikethrough and footnotes are enabled. Raw HTML in the source is
/// passed through unchanged; page content is authored by the site admin.
pub fn render(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(content, options);
    let mut out = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
