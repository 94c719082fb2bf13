//! Semantic error taxonomy and the sink that collects them.

use std::fmt;

use thiserror::Error;

use crate::parser::ast::Position;

/// A semantic violation found while checking a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// Referenced relation is not in the catalog.
    #[error("Relation does not exist: \"{name}\"")]
    UnknownRelation { name: String },

    /// Referenced attribute is not in the operand schema.
    #[error("Attribute does not exist: \"{name}\"")]
    UnknownAttribute { name: String },

    /// Union, intersection or difference over operands of different arity.
    #[error("For the {operator} operation, the relations must have the same number of attributes")]
    ArityMismatch { operator: &'static str },

    /// Divisor is not smaller than, or not a subset of, the dividend.
    #[error("The divisor of the operation must be a subset of the dividend: \"{token}\"")]
    InvalidDivision { token: String },

    /// Transitive closure over a relation that is not binary.
    #[error("Transitive closure requires a binary relation, found {found} attribute(s)")]
    InvalidArity { found: usize },

    /// Ordering comparison with a non-numeric operand.
    #[error("Size comparator '{op}' requires two numeric operands")]
    NonNumericComparison { op: String },

    /// Arithmetic with a non-numeric operand.
    #[error("Operator '{op}' requires two numeric operands")]
    NonNumericArithmetic { op: String },

    /// Logical operator with a non-boolean operand.
    #[error("Logical operator '{op}' requires two boolean operands")]
    NonBooleanOperand { op: String },
}

/// A semantic error together with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub error: SemanticError,
    pub line: usize,
    pub column: usize,
}

impl Diagnostic {
    /// Returns the human-readable description.
    #[must_use]
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.error, self.line, self.column
        )
    }
}

/// Ordered collection of diagnostics. Recording never interrupts the caller.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Diagnostics {
            entries: Vec::new(),
        }
    }

    /// Records a violation at `position`.
    pub fn report(&mut self, error: SemanticError, position: &Position) {
        let diagnostic = Diagnostic {
            error,
            line: position.line,
            column: position.column,
        };
        log::warn!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    /// Number of violations recorded so far.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recorded diagnostics in traversal order.
    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Iterates over recorded diagnostics in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_error_display() {
        let err = SemanticError::UnknownAttribute {
            name: "ghost".into(),
        };
        assert_eq!(err.to_string(), "Attribute does not exist: \"ghost\"");

        let err = SemanticError::ArityMismatch { operator: "union" };
        assert!(err.to_string().contains("union operation"));

        let err = SemanticError::InvalidArity { found: 3 };
        assert!(err.to_string().contains("found 3"));
    }

    #[test]
    fn test_report_counts_and_keeps_order() {
        let mut sink = Diagnostics::new();
        assert!(sink.is_empty());

        sink.report(
            SemanticError::UnknownRelation {
                name: "Ghost".into(),
            },
            &Position::new(1, 12, "Ghost"),
        );
        sink.report(
            SemanticError::UnknownAttribute {
                name: "ghost".into(),
            },
            &Position::new(1, 9, "ghost"),
        );

        assert_eq!(sink.error_count(), 2);
        let first = &sink.entries()[0];
        assert_eq!((first.line, first.column), (1, 12));
        assert_eq!(
            first.to_string(),
            "Relation does not exist: \"Ghost\" at line 1, column 12"
        );
        assert!(matches!(
            sink.iter().nth(1).map(|d| &d.error),
            Some(SemanticError::UnknownAttribute { .. })
        ));

        sink.clear();
        assert_eq!(sink.error_count(), 0);
    }
}
