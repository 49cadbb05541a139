//! Identity-path addressing
//!
//! Every node in a traversal gets a stable string key built from the shape of
//! the descent: `.name` for a named-member access, `[literal]` for a keyed or
//! indexed access, `.cont-{n}` for a synthetic pagination marker. Re-walking
//! an unchanged value shape yields identical paths, which is what lets
//! per-node UI state survive refreshes without holding any reference to the
//! value itself.

use crate::reflect::Key;

/// Path of a child reached through a named member
pub fn member_path(parent: &str, name: &str) -> String {
    format!("{}.{}", parent, name)
}

/// Path of a child reached through a key or index
pub fn index_path(parent: &str, key: &Key) -> String {
    format!("{}[{}]", parent, key.repr())
}

/// Path of the synthetic "…more" marker after element `n`
pub fn continuation_path(parent: &str, n: usize) -> String {
    format!("{}.cont-{}", parent, n)
}

/// True if `path` addresses `prefix` itself or one of its descendants.
///
/// A descendant continues the prefix with a member or index separator and a
/// non-empty remainder; `foobar` is not a descendant of `foo`.
pub fn is_descendant(path: &str, prefix: &str) -> bool {
    if path == prefix {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.starts_with('.') || rest.starts_with('['),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_steps() {
        assert_eq!(member_path("obj", "field"), "obj.field");
        assert_eq!(index_path("xs", &Key::Int(3)), "xs[3]");
        assert_eq!(
            index_path("d", &Key::Str("k".to_string())),
            "d[\"k\"]"
        );
        assert_eq!(continuation_path("xs", 10), "xs.cont-10");
    }

    #[test]
    fn test_descendant() {
        assert!(is_descendant("a", "a"));
        assert!(is_descendant("a.b", "a"));
        assert!(is_descendant("a[0]", "a"));
        assert!(is_descendant("a.b[2].c", "a.b"));
        assert!(!is_descendant("ab", "a"));
        assert!(!is_descendant("a", "a.b"));
        assert!(!is_descendant("b.a", "a"));
    }
}
