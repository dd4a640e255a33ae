//! Structural fingerprints
//!
//! A fingerprint is a canonical serialization of a declaration tree: two
//! declarations with equal fingerprints compile to the same rules. Keys and
//! literals are written quoted so no input can forge structure.
//!
//! Dynamic leaves are written by their structural key when they have one,
//! otherwise by the address of their shared function object. An address is
//! only stable while the function is alive, so whoever stores a fingerprint
//! must also keep the declaration's functions alive.

use crate::declaration::{Node, StyleDeclaration, Value};

enum Frame<'a, T> {
    Open(&'a StyleDeclaration<T>),
    Entry(&'a str, &'a Node<T>),
    Close,
}

/// Canonical serialization of a declaration tree
pub fn fingerprint<T>(declaration: &StyleDeclaration<T>) -> String {
    let mut out = String::new();
    let mut stack = vec![Frame::Open(declaration)];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Open(level) => {
                out.push('{');
                stack.push(Frame::Close);
                for (key, node) in level.iter().rev() {
                    stack.push(Frame::Entry(key, node));
                }
            }
            Frame::Entry(key, node) => {
                out.push_str(&format!("{:?}", key));
                match node {
                    Node::Leaf(Value::Literal(literal)) => {
                        out.push_str(&format!("={:?};", literal));
                    }
                    Node::Leaf(Value::Dynamic(dynamic)) => match dynamic.key() {
                        Some(key) => out.push_str(&format!("=dyn{:?};", key)),
                        None => out.push_str(&format!("=dyn@{:x};", dynamic.identity())),
                    },
                    Node::Nested(child) => stack.push(Frame::Open(child)),
                }
            }
            Frame::Close => out.push('}'),
        }
    }

    out
}
