//! Rule emission
//!
//! Walks a declaration tree depth-first and flattens it into one
//! self-contained rule per selector node. A node's own properties are
//! emitted before the rules of its nested selectors. Dynamic leaves are
//! replaced by `var(--<class>-<n>)` references, numbered in the same order.

use std::fmt;

use smallvec::SmallVec;

use crate::declaration::{StyleDeclaration, Value};
use crate::error::CssResult;
use crate::partition::partition;
use crate::selector::{class_selector, join};
use crate::values::{custom_property_name, DynamicBindings, RenderedStyle, ResolvedValues};

/// A single `property:value` pair inside a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDeclaration {
    pub property: String,
    pub value: String,
}

impl RuleDeclaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for RuleDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{};", self.property, self.value)
    }
}

/// A flat CSS rule: one selector and its declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selector: String,
    pub declarations: SmallVec<[RuleDeclaration; 4]>,
}

impl Rule {
    /// Render as an insertable rule string
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{ ", self.selector)?;
        for decl in &self.declarations {
            write!(f, "{} ", decl)?;
        }
        write!(f, "}}")
    }
}

/// Output of compiling one declaration under one class name
#[derive(Debug)]
pub struct CompiledRuleSet<T> {
    class_name: String,
    rules: Vec<Rule>,
    bindings: DynamicBindings<T>,
}

impl<T> CompiledRuleSet<T> {
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Rules in emission order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rules rendered as insertable strings, in emission order
    pub fn rule_strings(&self) -> Vec<String> {
        self.rules.iter().map(Rule::to_css).collect()
    }

    /// Custom properties introduced for dynamic leaves
    pub fn bindings(&self) -> &DynamicBindings<T> {
        &self.bindings
    }

    pub fn has_dynamic_values(&self) -> bool {
        !self.bindings.is_empty()
    }

    /// Resolve the custom property values for one input record
    pub fn materialize(&self, input: &T) -> CssResult<ResolvedValues> {
        self.bindings.materialize(input)
    }

    /// Class name plus resolved values, ready to apply to an element
    pub fn render(&self, input: &T) -> CssResult<RenderedStyle> {
        Ok(RenderedStyle {
            class_name: self.class_name.clone(),
            values: self.materialize(input)?,
        })
    }
}

/// Compile a declaration into rules scoped under `.class_name`.
///
/// Uses an explicit stack, so deeply nested input cannot overflow the call
/// stack. Children are pushed in reverse to pop in declaration order.
pub fn compile<T>(declaration: &StyleDeclaration<T>, class_name: &str) -> CompiledRuleSet<T> {
    let mut rules = Vec::new();
    let mut bindings = DynamicBindings::new();
    let mut stack = vec![(class_selector(class_name), declaration)];

    while let Some((selector, level)) = stack.pop() {
        let parts = partition(level);

        let mut declarations = SmallVec::new();
        for (property, value) in parts.leaves {
            let value = match value {
                Value::Literal(literal) => literal.clone(),
                Value::Dynamic(dynamic) => {
                    let name = custom_property_name(class_name, bindings.len());
                    let reference = format!("var({})", name);
                    bindings.push(name, dynamic.clone());
                    reference
                }
            };
            declarations.push(RuleDeclaration::new(property, value));
        }

        for (key, child) in parts.nested.iter().rev() {
            stack.push((join(&selector, key), *child));
        }

        let rule = Rule { selector, declarations };
        log::trace!("Emitted rule: {}", rule);
        rules.push(rule);
    }

    log::debug!(
        "Compiled .{}: {} rules, {} custom properties",
        class_name,
        rules.len(),
        bindings.len()
    );

    CompiledRuleSet {
        class_name: class_name.to_string(),
        rules,
        bindings,
    }
}
