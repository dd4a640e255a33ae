//! Swatch CSS Compiler
//!
//! Compiles nested style declarations into flat, class-scoped CSS rules.
//! Dynamic property values are moved into generated custom properties so
//! the rules stay fixed while the values change per input record.

pub mod declaration;
pub mod emitter;
pub mod error;
pub mod fingerprint;
pub mod json;
pub mod partition;
pub mod selector;
pub mod values;

pub use declaration::{DynamicValue, Node, StyleDeclaration, Value};
pub use emitter::{compile, CompiledRuleSet, Rule, RuleDeclaration};
pub use error::{CssError, CssResult, KeyPath};
pub use fingerprint::fingerprint;
pub use json::{load_declaration, load_declarations, parse_declaration, JsonDeclaration};
pub use partition::{partition, Partition};
pub use selector::{class_selector, join};
pub use values::{custom_property_name, DynamicBindings, RenderedStyle, ResolvedValues};
