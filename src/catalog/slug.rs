/// Derives a URL-safe, lowercase, strict-ASCII token from a display name.
///
/// Non-ASCII characters are dropped; whitespace and separator punctuation
/// collapse to single hyphens. The result never starts or ends with a hyphen.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if (ch.is_whitespace() || matches!(ch, '.' | '_' | '-' | '/' | '\\'))
            && !slug.ends_with('-')
        {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

/// Appends `-{counter}` to the base slug; counter 0 is the base itself.
#[must_use]
pub fn with_suffix(base: &str, counter: u32) -> String {
    if counter == 0 {
        base.to_string()
    } else {
        format!("{base}-{counter}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("The Dark Knight"), "the-dark-knight");
        assert_eq!(slugify("  Spider-Man: No Way Home  "), "spider-man-no-way-home");
    }

    #[test]
    fn strips_non_ascii() {
        assert_eq!(slugify("Amélie"), "amlie");
        assert_eq!(slugify("映画"), "");
    }

    #[test]
    fn collapses_separator_runs() {
        assert_eq!(slugify("a  -  b"), "a-b");
        assert_eq!(slugify("v1.2_final"), "v1-2-final");
    }

    #[test]
    fn suffix_zero_is_base() {
        assert_eq!(with_suffix("dune", 0), "dune");
        assert_eq!(with_suffix("dune", 2), "dune-2");
    }
}
