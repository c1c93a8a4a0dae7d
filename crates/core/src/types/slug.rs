//! URL slug derivation for car records.
//!
//! Slugs are derived from the record title at creation time. Two records
//! with colliding titles get a numeric suffix (`-2`, `-3`, ...) so slugs
//! stay unique within the store.

/// Turn a title into a URL slug.
///
/// Lowercases, maps runs of non-alphanumeric characters to single hyphens,
/// and trims leading/trailing hyphens.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Derive a slug for `title` that does not collide with `taken`.
///
/// The first collision gets a `-2` suffix, the next `-3`, and so on.
#[must_use]
pub fn unique_slug<'a, I>(title: &str, taken: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let base = slugify(title);
    let taken: std::collections::HashSet<&str> = taken.into_iter().collect();

    if !taken.contains(base.as_str()) {
        return base;
    }

    let mut n: u32 = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Alfa Romeo Giulia"), "alfa-romeo-giulia");
    }

    #[test]
    fn test_slugify_collapses_punctuation() {
        assert_eq!(slugify("  Fiat 500 -- 1.2 Lounge! "), "fiat-500-1-2-lounge");
    }

    #[test]
    fn test_slugify_lowercases_unicode() {
        assert_eq!(slugify("Citroën C3"), "citroën-c3");
    }

    #[test]
    fn test_unique_slug_no_collision() {
        assert_eq!(unique_slug("BMW 320d", ["audi-a4"]), "bmw-320d");
    }

    #[test]
    fn test_unique_slug_suffixes_collisions() {
        assert_eq!(unique_slug("BMW 320d", ["bmw-320d"]), "bmw-320d-2");
        assert_eq!(
            unique_slug("BMW 320d", ["bmw-320d", "bmw-320d-2"]),
            "bmw-320d-3"
        );
    }
}
