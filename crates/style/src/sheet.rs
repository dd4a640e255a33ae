//! Rule sink
//!
//! Collects rule strings in insertion order. A renderer can either read the
//! whole sheet or drain only the rules added since its last flush.

/// Append-only list of rule strings
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    rules: Vec<String>,
    flushed: usize,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule and return its index
    pub fn insert_rule(&mut self, rule: impl Into<String>) -> usize {
        self.rules.push(rule.into());
        self.rules.len() - 1
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules inserted since the previous call
    pub fn take_pending(&mut self) -> &[String] {
        let start = self.flushed;
        self.flushed = self.rules.len();
        &self.rules[start..]
    }

    /// Whole sheet, one rule per line
    pub fn to_css(&self) -> String {
        self.rules.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_order() {
        let mut sheet = StyleSheet::new();
        assert_eq!(sheet.insert_rule(".a { }"), 0);
        assert_eq!(sheet.insert_rule(".b { }"), 1);
        assert_eq!(sheet.to_css(), ".a { }\n.b { }");
    }

    #[test]
    fn test_take_pending() {
        let mut sheet = StyleSheet::new();
        sheet.insert_rule(".a { }");
        assert_eq!(sheet.take_pending(), [".a { }".to_string()]);
        assert!(sheet.take_pending().is_empty());

        sheet.insert_rule(".b { }");
        sheet.insert_rule(".c { }");
        assert_eq!(sheet.take_pending().len(), 2);
        assert_eq!(sheet.len(), 3);
    }
}
