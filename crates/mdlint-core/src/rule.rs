//! Rule trait for defining lint rules.

use crate::document::Document;
use crate::params::{ParamSpec, RuleParams};
use crate::types::Violation;

/// A Markdown lint rule.
///
/// Rules are independent and side-effect free: a rule receives the parsed
/// document and its resolved parameters and returns whatever it finds.
/// The engine may run rules concurrently and in any order.
///
/// # Example
///
/// ```ignore
/// use mdlint_core::{Document, Rule, RuleParams, Violation};
///
/// pub struct NoTodo;
///
/// impl Rule for NoTodo {
///     fn code(&self) -> &'static str { "MD900" }
///     fn name(&self) -> &'static str { "no-todo" }
///
///     fn check(&self, doc: &Document, _params: &RuleParams) -> Vec<Violation> {
///         doc.lines()
///             .iter()
///             .filter(|l| l.text.contains("TODO"))
///             .map(|l| self.violation(l.number, "TODO left in document"))
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the stable rule identifier (e.g., "MD007").
    fn code(&self) -> &'static str;

    /// Returns the kebab-case alias of this rule (e.g., "ul-indent").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the tags this rule belongs to (e.g., `["headers"]`).
    fn tags(&self) -> &'static [&'static str] {
        &[]
    }

    /// Returns the parameter schema with defaults.
    fn params(&self) -> &'static [ParamSpec] {
        &[]
    }

    /// Checks a document and returns any violations found.
    ///
    /// `params` always contains every declared parameter; missing overrides
    /// have been filled with defaults.
    fn check(&self, doc: &Document, params: &RuleParams) -> Vec<Violation>;

    /// Builds a violation attributed to this rule.
    fn violation(&self, line: usize, message: impl Into<String>) -> Violation
    where
        Self: Sized,
    {
        Violation::new(self.code(), self.name(), line, message)
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRule;

    impl Rule for TestRule {
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, doc: &Document, _params: &RuleParams) -> Vec<Violation> {
            vec![self.violation(doc.lines().len(), "Test violation")]
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert!(rule.tags().is_empty());
        assert!(rule.params().is_empty());
    }

    #[test]
    fn violation_helper_attributes_rule() {
        let doc = Document::parse("a\nb\n");
        let found = TestRule.check(&doc, &RuleParams::default());
        assert_eq!(found[0].code, "TEST001");
        assert_eq!(found[0].rule, "test-rule");
        assert_eq!(found[0].line, 2);
    }
}
