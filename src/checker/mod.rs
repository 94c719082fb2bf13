//! Checker module for semantic analysis.
//!
//! The checker walks parsed statements against the catalog, resolving:
//! - Relation and attribute names
//! - Arity constraints of the set, division and closure operators
//! - Coarse operand types in selection predicates
//!
//! Each relational sub-expression gets a slot whose catalog relation holds
//! its output schema; these slots are what a translator reads afterwards.

mod diagnostic;
mod expression;
mod relational;
mod semantic;
mod slots;

pub use diagnostic::{Diagnostic, Diagnostics, SemanticError};
pub use expression::ExpressionChecker;
pub use semantic::{Analyzer, AnalyzerConfig, DEFAULT_SLOT_PREFIX};
pub use slots::{SlotAllocator, SlotId};
