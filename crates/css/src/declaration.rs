//! Style declaration tree
//!
//! A declaration maps keys to either leaf values (literal or dynamic) or
//! nested declarations. Whether a key is a property or a selector is decided
//! by the variant of its value, never by the key itself.

use std::fmt;
use std::sync::Arc;

use crate::error::CssResult;

type InfallibleFn<T> = dyn Fn(&T) -> String + Send + Sync;
type FallibleFn<T> = dyn Fn(&T) -> CssResult<String> + Send + Sync;

enum DynamicFn<T> {
    Infallible(Arc<InfallibleFn<T>>),
    Fallible(Arc<FallibleFn<T>>),
}

/// A property value computed from an input record at render time
pub struct DynamicValue<T> {
    func: DynamicFn<T>,
    /// Structural identity used for fingerprinting, if the caller gave one
    key: Option<String>,
}

impl<T> DynamicValue<T> {
    /// Wrap an infallible function
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            func: DynamicFn::Infallible(Arc::new(f)),
            key: None,
        }
    }

    /// Wrap a function that may fail; its error reaches the caller unchanged
    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn(&T) -> CssResult<String> + Send + Sync + 'static,
    {
        Self {
            func: DynamicFn::Fallible(Arc::new(f)),
            key: None,
        }
    }

    /// Attach a structural key. Two dynamic values with the same key are
    /// treated as interchangeable by the rule-set cache.
    pub fn keyed(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Apply the function to an input record
    pub fn resolve(&self, input: &T) -> CssResult<String> {
        match &self.func {
            DynamicFn::Infallible(f) => Ok(f(input)),
            DynamicFn::Fallible(f) => f(input),
        }
    }

    /// Address of the shared function object
    pub fn identity(&self) -> usize {
        match &self.func {
            DynamicFn::Infallible(f) => Arc::as_ptr(f) as *const () as usize,
            DynamicFn::Fallible(f) => Arc::as_ptr(f) as *const () as usize,
        }
    }

    /// Whether both values share the same function object
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.func, &other.func) {
            (DynamicFn::Infallible(a), DynamicFn::Infallible(b)) => Arc::ptr_eq(a, b),
            (DynamicFn::Fallible(a), DynamicFn::Fallible(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T> Clone for DynamicValue<T> {
    fn clone(&self) -> Self {
        let func = match &self.func {
            DynamicFn::Infallible(f) => DynamicFn::Infallible(Arc::clone(f)),
            DynamicFn::Fallible(f) => DynamicFn::Fallible(Arc::clone(f)),
        };
        Self {
            func,
            key: self.key.clone(),
        }
    }
}

impl<T> fmt::Debug for DynamicValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "DynamicValue({})", key),
            None => write!(f, "DynamicValue(@{:#x})", self.identity()),
        }
    }
}

/// A leaf property value
#[derive(Debug)]
pub enum Value<T> {
    /// Fixed at compile time
    Literal(String),
    /// Resolved per input record through a custom property
    Dynamic(DynamicValue<T>),
}

impl<T> Value<T> {
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Value::Dynamic(_))
    }
}

impl<T> Clone for Value<T> {
    fn clone(&self) -> Self {
        match self {
            Value::Literal(s) => Value::Literal(s.clone()),
            Value::Dynamic(d) => Value::Dynamic(d.clone()),
        }
    }
}

/// What a declaration key maps to
#[derive(Debug)]
pub enum Node<T> {
    Leaf(Value<T>),
    Nested(StyleDeclaration<T>),
}

impl<T> Clone for Node<T> {
    fn clone(&self) -> Self {
        match self {
            Node::Leaf(v) => Node::Leaf(v.clone()),
            Node::Nested(d) => Node::Nested(d.clone()),
        }
    }
}

/// Ordered mapping from property names and selector fragments to values
#[derive(Debug)]
pub struct StyleDeclaration<T> {
    entries: Vec<(String, Node<T>)>,
}

impl<T> StyleDeclaration<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Insert an entry. An existing key keeps its position and has its value
    /// replaced; the previous value is returned.
    pub fn insert(&mut self, key: impl Into<String>, node: Node<T>) -> Option<Node<T>> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, node)),
            None => {
                self.entries.push((key, node));
                None
            }
        }
    }

    /// Add a literal property
    pub fn property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, Node::Leaf(Value::Literal(value.into())));
        self
    }

    /// Add a property computed from the input record
    pub fn dynamic<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.insert(name, Node::Leaf(Value::Dynamic(DynamicValue::new(f))));
        self
    }

    /// Add a prebuilt dynamic value (fallible or keyed)
    pub fn dynamic_value(mut self, name: impl Into<String>, value: DynamicValue<T>) -> Self {
        self.insert(name, Node::Leaf(Value::Dynamic(value)));
        self
    }

    /// Add a nested selector block
    pub fn nested(mut self, selector: impl Into<String>, declaration: StyleDeclaration<T>) -> Self {
        self.insert(selector, Node::Nested(declaration));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Node<T>> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, node)| node)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &Node<T>)> {
        self.entries.iter().map(|(k, node)| (k.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of dynamic leaves anywhere in the tree
    pub fn dynamic_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(level) = stack.pop() {
            for (_, node) in level.iter() {
                match node {
                    Node::Leaf(value) if value.is_dynamic() => count += 1,
                    Node::Leaf(_) => {}
                    Node::Nested(child) => stack.push(child),
                }
            }
        }
        count
    }
}

impl<T> Default for StyleDeclaration<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for StyleDeclaration<T> {
    fn clone(&self) -> Self {
        // Breadth-first list of levels; a level's children are contiguous
        // and always come after it.
        let mut levels = vec![self];
        let mut first_child = Vec::new();
        let mut index = 0;
        while index < levels.len() {
            first_child.push(levels.len());
            for (_, node) in levels[index].iter() {
                if let Node::Nested(child) = node {
                    levels.push(child);
                }
            }
            index += 1;
        }

        // Copy from the deepest levels up, so every child is ready before
        // its parent needs it.
        let mut built: Vec<Option<Self>> = levels.iter().map(|_| None).collect();
        for index in (0..levels.len()).rev() {
            let mut next_child = first_child[index];
            let mut entries = Vec::with_capacity(levels[index].entries.len());
            for (key, node) in &levels[index].entries {
                let node = match node {
                    Node::Leaf(value) => Node::Leaf(value.clone()),
                    Node::Nested(_) => {
                        let child = built[next_child].take().unwrap_or_default();
                        next_child += 1;
                        Node::Nested(child)
                    }
                };
                entries.push((key.clone(), node));
            }
            built[index] = Some(Self { entries });
        }

        built[0].take().unwrap_or_default()
    }
}

impl<T> Drop for StyleDeclaration<T> {
    fn drop(&mut self) {
        // Detach nested levels onto a local stack so dropping never recurses
        let mut stack = Vec::new();
        detach_nested(&mut self.entries, &mut stack);
        while let Some(mut level) = stack.pop() {
            detach_nested(&mut level.entries, &mut stack);
        }
    }
}

fn detach_nested<T>(entries: &mut [(String, Node<T>)], stack: &mut Vec<StyleDeclaration<T>>) {
    for (_, node) in entries.iter_mut() {
        if let Node::Nested(child) = node {
            if !child.is_empty() {
                stack.push(std::mem::take(child));
            }
        }
    }
}
