//! Semantic analysis driver.

use crate::catalog::{Catalog, Relation};
use crate::error::{Result, RqlError};
use crate::parser::ast::Statement;

use super::diagnostic::Diagnostics;
use super::slots::{SlotAllocator, SlotId};

/// Default catalog name prefix for slot relations. `$` cannot appear in a
/// declared identifier, so slot names never shadow persistent relations.
pub const DEFAULT_SLOT_PREFIX: &str = "$slot";

/// Configuration for the analyzer.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Catalog name prefix for slot relations.
    slot_prefix: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            slot_prefix: DEFAULT_SLOT_PREFIX.to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Creates a new analyzer configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the slot relation name prefix.
    ///
    /// The prefix must contain a character that cannot appear in a declared
    /// identifier (anything but ASCII letters, digits and `_`), otherwise a
    /// slot could rebind a persistent relation such as `tmp1`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the prefix could spell an identifier.
    pub fn with_slot_prefix(mut self, prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        if prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(RqlError::ConfigError(format!(
                "Slot prefix '{prefix}' could collide with a declared relation"
            )));
        }
        self.slot_prefix = prefix;
        Ok(self)
    }

    /// Catalog name prefix for slot relations.
    #[must_use]
    pub fn slot_prefix(&self) -> &str {
        &self.slot_prefix
    }
}

/// Semantic analyzer over a catalog.
///
/// The analyzer walks statements depth-first, allocating one slot per
/// relational sub-expression and filling it with that sub-expression's
/// output schema. Violations are recorded and the walk always continues.
/// Slot numbering continues across calls to [`Analyzer::analyze`].
pub struct Analyzer<'a> {
    /// Catalog of persistent relations; slot relations are added to it.
    pub(super) catalog: &'a mut Catalog,
    pub(super) slots: SlotAllocator,
    pub(super) diagnostics: Diagnostics,
}

impl<'a> Analyzer<'a> {
    /// Creates an analyzer with the default configuration.
    #[must_use]
    pub fn new(catalog: &'a mut Catalog) -> Self {
        Self::with_config(catalog, AnalyzerConfig::default())
    }

    /// Creates an analyzer with the given configuration.
    #[must_use]
    pub fn with_config(catalog: &'a mut Catalog, config: AnalyzerConfig) -> Self {
        Analyzer {
            catalog,
            slots: SlotAllocator::new(config.slot_prefix),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Checks every statement and returns the total number of semantic
    /// errors recorded by this analyzer.
    pub fn analyze(&mut self, statements: &[Statement]) -> usize {
        if statements.is_empty() {
            log::info!("Nothing to be analysed");
            return self.error_count();
        }

        log::info!(
            "Starting the semantic analysis of {} statement(s)",
            statements.len()
        );
        for statement in statements {
            match statement {
                Statement::Query(query) => {
                    let slot = self.check_read_only(query);
                    log::debug!("statement result in slot {slot}");
                }
            }
        }
        log::info!(
            "Semantic analysis finished with {} error(s)",
            self.error_count()
        );
        self.error_count()
    }

    /// Number of semantic errors recorded so far.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.diagnostics.error_count()
    }

    /// Recorded diagnostics in traversal order.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Resets the error count and diagnostics. Slot numbering is unaffected.
    pub fn clear_diagnostics(&mut self) {
        self.diagnostics.clear();
    }

    /// Consumes the analyzer, returning its diagnostics and the slot
    /// allocator that names its slot relations.
    #[must_use]
    pub fn into_parts(self) -> (Diagnostics, SlotAllocator) {
        (self.diagnostics, self.slots)
    }

    /// Returns the catalog, including slot relations.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &*self.catalog
    }

    /// Most recently allocated slot.
    #[must_use]
    pub fn current_slot(&self) -> SlotId {
        self.slots.current()
    }

    /// Catalog name of a slot's relation.
    #[must_use]
    pub fn slot_name(&self, slot: SlotId) -> String {
        self.slots.name(slot)
    }

    /// Output schema computed for a slot.
    #[must_use]
    pub fn slot_relation(&self, slot: SlotId) -> Option<&Relation> {
        self.catalog.get_relation(&self.slots.name(slot))
    }

    /// All slots allocated so far, in allocation order.
    pub fn slots(&self) -> impl Iterator<Item = SlotId> {
        self.slots.allocated()
    }
}
