//! Slug generation for page URLs.
//!
//! A slug is the URL path segment a page is served under (`/{slug}`). It is
//! derived from the page title on every save and never edited directly.

use unicode_normalization::UnicodeNormalization;

/// Generate a URL-safe slug from a page title.
///
/// Lowercases the title, drops punctuation, turns runs of whitespace,
/// hyphens and underscores into a single hyphen, and trims leading/trailing
/// hyphens. Accented letters fold to their ASCII base through NFKD
/// decomposition; anything still outside ASCII is dropped.
///
/// ```
/// use pita_core::slug::slugify;
///
/// assert_eq!(slugify("My Show"), "my-show");
/// assert_eq!(slugify("Rock 'n' Roll!"), "rock-n-roll");
/// assert_eq!(slugify("Café Noir"), "cafe-noir");
/// ```
pub fn slugify(title: &str) -> String {
    let mut result = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.nfkd() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !result.is_empty() {
                result.push('-');
            }
            pending_hyphen = false;
            result.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_hyphen = true;
        }
        // Punctuation, combining marks and other non-ASCII are dropped.
    }

    result
}

/// Whether `slug` has the shape accepted by the page route: lowercase
/// alphanumeric words separated by single hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_become_hyphens() {
        assert_eq!(slugify("My Show"), "my-show");
    }

    #[test]
    fn punctuation_is_dropped() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("it's"), "its");
    }

    #[test]
    fn runs_collapse() {
        assert_eq!(slugify("  a -- b__c  "), "a-b-c");
    }

    #[test]
    fn digits_survive() {
        assert_eq!(slugify("Sketches 2018"), "sketches-2018");
    }

    #[test]
    fn accents_fold_to_ascii() {
        assert_eq!(slugify("Café Noir"), "cafe-noir");
        assert_eq!(slugify("Über Größe"), "uber-groe");
        assert_eq!(slugify("ﬁne Ｗｏｒｋ"), "fine-work");
    }

    #[test]
    fn unfoldable_characters_are_dropped() {
        assert_eq!(slugify("東京 Sketches"), "sketches");
    }

    #[test]
    fn only_punctuation_gives_empty() {
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn idempotent() {
        let once = slugify("Some Title Here");
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn slugified_output_is_valid() {
        for title in ["My Show", "a -- b", "X", "2018 works"] {
            assert!(is_valid_slug(&slugify(title)), "{title}");
        }
    }

    #[test]
    fn invalid_slugs() {
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-a"));
        assert!(!is_valid_slug("a--b"));
        assert!(!is_valid_slug("Upper"));
    }
}
