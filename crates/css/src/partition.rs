//! Declaration partitioning
//!
//! Splits one level of a declaration into leaf properties and nested
//! selector blocks, keeping the declaration's order within each group.

use smallvec::SmallVec;

use crate::declaration::{Node, StyleDeclaration, Value};

/// One declaration level, split by value shape
#[derive(Debug)]
pub struct Partition<'a, T> {
    /// Property name and value, in declaration order
    pub leaves: SmallVec<[(&'a str, &'a Value<T>); 8]>,
    /// Selector key and nested block, in declaration order
    pub nested: SmallVec<[(&'a str, &'a StyleDeclaration<T>); 4]>,
}

/// Partition a declaration level by the variant of each value
pub fn partition<T>(declaration: &StyleDeclaration<T>) -> Partition<'_, T> {
    let mut leaves = SmallVec::new();
    let mut nested = SmallVec::new();

    for (key, node) in declaration.iter() {
        match node {
            Node::Leaf(value) => leaves.push((key, value)),
            Node::Nested(child) => nested.push((key, child)),
        }
    }

    Partition { leaves, nested }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_by_shape() {
        let decl: StyleDeclaration<()> = StyleDeclaration::new()
            .property("color", "blue")
            .nested(":hover", StyleDeclaration::new().property("color", "green"))
            .dynamic("width", |_| "10px".into())
            .nested(".child", StyleDeclaration::new());

        let parts = partition(&decl);
        let leaves: Vec<&str> = parts.leaves.iter().map(|(k, _)| *k).collect();
        let nested: Vec<&str> = parts.nested.iter().map(|(k, _)| *k).collect();

        assert_eq!(leaves, vec!["color", "width"]);
        assert_eq!(nested, vec![":hover", ".child"]);
        assert!(parts.leaves[1].1.is_dynamic());
    }

    #[test]
    fn test_partition_ignores_key_names() {
        // A pseudo-looking key with a literal value is still a property
        let decl: StyleDeclaration<()> = StyleDeclaration::new()
            .property(":hover", "x")
            .nested("color", StyleDeclaration::new());

        let parts = partition(&decl);
        assert_eq!(parts.leaves[0].0, ":hover");
        assert_eq!(parts.nested[0].0, "color");
    }

    #[test]
    fn test_partition_empty() {
        let decl: StyleDeclaration<()> = StyleDeclaration::new();
        let parts = partition(&decl);
        assert!(parts.leaves.is_empty());
        assert!(parts.nested.is_empty());
    }
}
