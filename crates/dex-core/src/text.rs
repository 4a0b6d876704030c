//! Display-name helpers.

/// Upper-cases the first character of `s` and leaves the rest untouched.
///
/// API names are lowercase slugs (`"mr-mime"`, `"ho-oh"`); only the leading
/// character changes, so `"mr-mime"` becomes `"Mr-mime"`.
///
/// # Examples
///
/// ```
/// use dex_core::capitalize;
///
/// assert_eq!(capitalize("bulbasaur"), "Bulbasaur");
/// assert_eq!(capitalize("mr-mime"), "Mr-mime");
/// assert_eq!(capitalize(""), "");
/// ```
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_lowercase_slug() {
        assert_eq!(capitalize("pikachu"), "Pikachu");
    }

    #[test]
    fn test_capitalize_keeps_remainder() {
        assert_eq!(capitalize("ho-oh"), "Ho-oh");
        assert_eq!(capitalize("Already"), "Already");
    }

    #[test]
    fn test_capitalize_non_ascii() {
        assert_eq!(capitalize("éclair"), "Éclair");
    }
}
