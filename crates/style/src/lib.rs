//! Swatch Style Definitions
//!
//! `StyleDef` owns everything that outlives a single compilation: the class
//! name counter, the rule set cache and the stylesheet that receives newly
//! emitted rules.

pub mod allocator;
pub mod cache;
pub mod config;
pub mod error;
pub mod sheet;

use std::sync::Arc;

use swatch_css::{compile, fingerprint, CompiledRuleSet, RenderedStyle, StyleDeclaration};

pub use allocator::ClassNameAllocator;
pub use cache::{CacheStats, RuleSetCache};
pub use config::StyleConfig;
pub use error::{StyleError, StyleResult};
pub use sheet::StyleSheet;

/// Compiles declarations into class-scoped rules for records of type `T`.
///
/// All state is mutated through `&mut self`. Hosts that compile from several
/// threads must wrap the instance in a lock.
#[derive(Debug)]
pub struct StyleDef<T> {
    config: StyleConfig,
    allocator: ClassNameAllocator,
    cache: RuleSetCache<T>,
    sheet: StyleSheet,
}

impl<T> StyleDef<T> {
    /// Create a style definition with the default configuration
    pub fn new() -> Self {
        Self::from_valid_config(StyleConfig::default())
    }

    /// Create a style definition with a custom configuration
    pub fn with_config(config: StyleConfig) -> StyleResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: StyleConfig) -> Self {
        Self {
            allocator: ClassNameAllocator::new(config.class_prefix.clone()),
            cache: RuleSetCache::new(),
            sheet: StyleSheet::new(),
            config,
        }
    }

    /// Compile a declaration, reusing an earlier rule set for a structurally
    /// identical declaration when memoization is on.
    ///
    /// New rules are appended to the stylesheet; a cache hit adds nothing.
    pub fn css(&mut self, declaration: &StyleDeclaration<T>) -> Arc<CompiledRuleSet<T>> {
        if !self.config.memoize {
            return self.compile_fresh(declaration);
        }

        let key = fingerprint(declaration);
        if let Some(set) = self.cache.get(&key) {
            log::debug!("Cache hit: .{}", set.class_name());
            return set;
        }

        let set = self.compile_fresh(declaration);
        self.cache.insert(key, Arc::clone(&set));
        set
    }

    /// Compile under a new class name, bypassing the cache
    pub fn compile_fresh(&mut self, declaration: &StyleDeclaration<T>) -> Arc<CompiledRuleSet<T>> {
        let class_name = self.allocator.allocate();
        let set = compile(declaration, &class_name);
        for rule in set.rules() {
            self.sheet.insert_rule(rule.to_css());
        }
        Arc::new(set)
    }

    /// Compile (or reuse) a declaration and resolve it for one input record
    pub fn render(
        &mut self,
        declaration: &StyleDeclaration<T>,
        input: &T,
    ) -> StyleResult<RenderedStyle> {
        Ok(self.css(declaration).render(input)?)
    }

    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    pub fn sheet(&self) -> &StyleSheet {
        &self.sheet
    }

    pub fn sheet_mut(&mut self) -> &mut StyleSheet {
        &mut self.sheet
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Number of class names handed out so far
    pub fn classes_allocated(&self) -> u64 {
        self.allocator.allocated()
    }
}

impl<T> Default for StyleDef<T> {
    fn default() -> Self {
        Self::new()
    }
}
