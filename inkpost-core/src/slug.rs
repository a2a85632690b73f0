//! Slug derivation for comic titles.
//!
//! A slug is the stable identity of a comic: it keys the catalog map and
//! shows up in menu callback tokens, so it has to be URL-safe and
//! deterministic. Derivation is a pure function of the title.

/// Derive a URL-safe slug from a title.
///
/// ASCII letters and digits are kept (lowercased); every run of other
/// characters collapses into a single hyphen, and leading or trailing
/// hyphens are dropped. Titles with no ASCII alphanumerics at all produce
/// an empty slug, which callers must reject.
///
/// The function is idempotent: `slugify(slugify(t)) == slugify(t)`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("The Iron Bloom"), "the-iron-bloom");
        assert_eq!(slugify("Tower of God: Part 2"), "tower-of-god-part-2");
    }

    #[test]
    fn collapses_runs_and_trims_ends() {
        assert_eq!(slugify("  --Spaced  Out--  "), "spaced-out");
        assert_eq!(slugify("!!!Bang!!!"), "bang");
        assert_eq!(slugify("a   b"), "a-b");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(slugify("100% Orange Juice"), "100-orange-juice");
        assert_eq!(slugify("Area 51"), "area-51");
    }

    #[test]
    fn non_ascii_becomes_separators() {
        assert_eq!(slugify("Café Crush"), "caf-crush");
        assert_eq!(slugify("枯れ木"), "");
    }

    #[test]
    fn empty_when_nothing_survives() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("  "), "");
    }

    #[test]
    fn idempotent() {
        for title in ["The Iron Bloom", "  --Spaced  Out--  ", "100% OJ", "!!!", "already-a-slug"] {
            let once = slugify(title);
            assert_eq!(slugify(&once), once, "slugify not idempotent for {title:?}");
        }
    }
}
