//! rql - Relational Query Language semantic checker
//!
//! Parses relational-algebra queries, checks them against declared relation
//! schemas, and computes the output schema of every sub-expression for a
//! downstream translator.

pub mod catalog;
pub mod checker;
pub mod error;
pub mod parser;
pub mod types;

pub use error::{Result, RqlError};

use catalog::{Catalog, Relation};
use checker::{Analyzer, AnalyzerConfig, Diagnostics, SlotAllocator, SlotId};

/// Outcome of checking a query against a set of declarations.
#[derive(Debug)]
pub struct Analysis {
    /// Persistent relations plus one relation per allocated slot.
    catalog: Catalog,
    /// Semantic errors in traversal order.
    diagnostics: Diagnostics,
    /// Allocator that named the slot relations during the run.
    slots: SlotAllocator,
}

impl Analysis {
    /// Number of semantic errors found.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.diagnostics.error_count()
    }

    /// Semantic errors in traversal order.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// The annotated catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Output schema computed for a slot.
    #[must_use]
    pub fn slot_relation(&self, slot: SlotId) -> Option<&Relation> {
        self.catalog.get_relation(&self.slots.name(slot))
    }

    /// Number of slots allocated.
    #[must_use]
    pub fn slot_count(&self) -> u32 {
        self.slots.current().get()
    }
}

/// Parses `declarations` and `query`, then checks the query.
///
/// # Errors
///
/// Returns an error if either text fails to parse or the declarations are
/// inconsistent. Semantic errors in the query are not `Err`; they are
/// reported through [`Analysis::diagnostics`].
pub fn analyze_query(declarations: &str, query: &str) -> Result<Analysis> {
    analyze_query_with_config(declarations, query, AnalyzerConfig::default())
}

/// Like [`analyze_query`], with an explicit analyzer configuration.
///
/// # Errors
///
/// See [`analyze_query`].
pub fn analyze_query_with_config(
    declarations: &str,
    query: &str,
    config: AnalyzerConfig,
) -> Result<Analysis> {
    let mut catalog = Catalog::from_declarations(declarations)?;
    let statements = parser::parse_program(query)?;

    let (diagnostics, slots) = {
        let mut analyzer = Analyzer::with_config(&mut catalog, config);
        analyzer.analyze(&statements);
        analyzer.into_parts()
    };

    Ok(Analysis {
        catalog,
        diagnostics,
        slots,
    })
}
