//! Selector joining
//!
//! Nested keys are appended to their parent selector: pseudo-classes and
//! pseudo-elements attach directly, anything else becomes a descendant.
//! Selectors are not validated or escaped.

/// Whether a nested key attaches directly to its parent (e.g. `:hover`, `::before`)
pub fn is_pseudo(key: &str) -> bool {
    key.starts_with(':')
}

/// Combine a parent selector with a nested key
pub fn join(parent: &str, key: &str) -> String {
    if is_pseudo(key) {
        format!("{}{}", parent, key)
    } else {
        format!("{} {}", parent, key)
    }
}

/// Selector for a generated class name
pub fn class_selector(class_name: &str) -> String {
    format!(".{}", class_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pseudo_class() {
        assert_eq!(join(".a", ":hover"), ".a:hover");
    }

    #[test]
    fn test_join_pseudo_element() {
        assert_eq!(join(".a", "::before"), ".a::before");
    }

    #[test]
    fn test_join_descendant() {
        assert_eq!(join(".a", ".b"), ".a .b");
        assert_eq!(join(".a", "span"), ".a span");
    }

    #[test]
    fn test_join_chain() {
        let inner = join(&join(".a", ":hover"), "> li");
        assert_eq!(inner, ".a:hover > li");
    }

    #[test]
    fn test_join_no_escaping() {
        assert_eq!(join(".a", "[data-x=\"}\"]"), ".a [data-x=\"}\"]");
    }

    #[test]
    fn test_class_selector() {
        assert_eq!(class_selector("css-0"), ".css-0");
    }
}
