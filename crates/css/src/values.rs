//! Custom property values
//!
//! Compilation records each dynamic leaf under a generated custom property.
//! Resolving those against an input record is a flat pass over the bindings
//! with no access to the declaration tree.

use std::fmt;

use crate::declaration::DynamicValue;
use crate::error::CssResult;

/// Name of the `index`th custom property generated for a class
pub fn custom_property_name(class_name: &str, index: usize) -> String {
    format!("--{}-{}", class_name, index)
}

/// Generated custom property names and the functions that feed them
#[derive(Debug)]
pub struct DynamicBindings<T> {
    entries: Vec<(String, DynamicValue<T>)>,
}

impl<T> DynamicBindings<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub(crate) fn push(&mut self, name: String, value: DynamicValue<T>) {
        debug_assert!(self.get(&name).is_none(), "duplicate custom property {}", name);
        self.entries.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&DynamicValue<T>> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DynamicValue<T>)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve every binding against one input record.
    ///
    /// The first failing function aborts resolution and its error is
    /// returned as is.
    pub fn materialize(&self, input: &T) -> CssResult<ResolvedValues> {
        let mut entries = Vec::with_capacity(self.entries.len());
        for (name, value) in self.iter() {
            entries.push((name.to_string(), value.resolve(input)?));
        }
        Ok(ResolvedValues { entries })
    }
}

impl<T> Default for DynamicBindings<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Custom property values for one input record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedValues {
    entries: Vec<(String, String)>,
}

impl ResolvedValues {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as an inline `style` attribute value
    pub fn to_inline_style(&self) -> String {
        self.entries
            .iter()
            .map(|(n, v)| format!("{}:{};", n, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// What a rendered element needs: its class and its custom property values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedStyle {
    pub class_name: String,
    pub values: ResolvedValues,
}

impl RenderedStyle {
    pub fn inline_style(&self) -> String {
        self.values.to_inline_style()
    }
}

impl fmt::Display for RenderedStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class=\"{}\"", self.class_name)?;
        if !self.values.is_empty() {
            write!(f, " style=\"{}\"", self.inline_style())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CssError;

    struct Record {
        mode: &'static str,
        size: u32,
    }

    fn bindings() -> DynamicBindings<Record> {
        let mut b = DynamicBindings::new();
        b.push(
            custom_property_name("c2", 0),
            DynamicValue::new(|r: &Record| {
                if r.mode == "light" {
                    "white".into()
                } else {
                    "black".into()
                }
            }),
        );
        b.push(
            custom_property_name("c2", 1),
            DynamicValue::new(|r: &Record| format!("{}px", r.size)),
        );
        b
    }

    #[test]
    fn test_custom_property_name() {
        assert_eq!(custom_property_name("c2", 0), "--c2-0");
        assert_eq!(custom_property_name("css-4", 12), "--css-4-12");
    }

    #[test]
    fn test_materialize() {
        let values = bindings().materialize(&Record { mode: "light", size: 4 }).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values.get("--c2-0"), Some("white"));
        assert_eq!(values.get("--c2-1"), Some("4px"));
        assert_eq!(values.get("--c2-2"), None);
    }

    #[test]
    fn test_materialize_is_repeatable() {
        let b = bindings();
        let dark = Record { mode: "dark", size: 1 };
        let first = b.materialize(&dark).unwrap();
        let second = b.materialize(&dark).unwrap();
        assert_eq!(first, second);

        let light = b.materialize(&Record { mode: "light", size: 1 }).unwrap();
        assert_eq!(light.get("--c2-0"), Some("white"));
        assert_eq!(first.get("--c2-0"), Some("black"));
    }

    #[test]
    fn test_materialize_propagates_error() {
        let mut b: DynamicBindings<Record> = DynamicBindings::new();
        b.push("--x-0".into(), DynamicValue::new(|_: &Record| "ok".into()));
        b.push(
            "--x-1".into(),
            DynamicValue::fallible(|_: &Record| Err(CssError::dynamic("no theme"))),
        );
        let err = b.materialize(&Record { mode: "light", size: 0 }).unwrap_err();
        assert!(matches!(err, CssError::Dynamic(ref m) if m == "no theme"));
    }

    #[test]
    fn test_inline_style() {
        let values = bindings().materialize(&Record { mode: "dark", size: 2 }).unwrap();
        assert_eq!(values.to_inline_style(), "--c2-0:black; --c2-1:2px;");

        let rendered = RenderedStyle {
            class_name: "c2".into(),
            values,
        };
        assert_eq!(
            rendered.to_string(),
            "class=\"c2\" style=\"--c2-0:black; --c2-1:2px;\""
        );
    }

    #[test]
    fn test_rendered_without_values() {
        let rendered = RenderedStyle {
            class_name: "c1".into(),
            values: ResolvedValues::default(),
        };
        assert_eq!(rendered.to_string(), "class=\"c1\"");
        assert_eq!(rendered.inline_style(), "");
    }
}
