//! Contract tests for the semantic checker.

mod binary_contract;
mod unitary_contract;

use rql::catalog::Catalog;
use rql::checker::{Analyzer, SemanticError, SlotId};
use rql::parser::parse_program;
use rql::types::DataType;

/// Declarations used throughout the contract tests.
pub const DECLARATIONS: &str = "People.idPeople:INTEGER; People.name:VARCHAR; People.age:INTEGER;\
     Sale.idSale:INTEGER; Sale.idPeople:INTEGER; Sale.saleDate:VARCHAR;\
     ItemSale.idSale:INTEGER; ItemSale.idProduct:INTEGER; ItemSale.quantity:INTEGER;\
     Product.idProduct:INTEGER; Product.name:VARCHAR; Product.price:DOUBLE;\
     Composition.idCompound:INTEGER; Composition.idComponent:INTEGER;\
     A.a1:INTEGER; A.b1:INTEGER; B.b1:INTEGER;";

/// Result of checking one program against [`DECLARATIONS`].
pub struct Checked {
    pub catalog: Catalog,
    pub errors: Vec<SemanticError>,
}

impl Checked {
    /// Number of semantic errors.
    pub fn count(&self) -> usize {
        self.errors.len()
    }

    /// `(name, type)` pairs of a slot's schema.
    pub fn slot(&self, slot: u32) -> Vec<(String, DataType)> {
        self.catalog
            .get_relation(&format!("$slot{}", SlotId::new(slot)))
            .expect("slot relation exists")
            .attributes()
            .iter()
            .map(|a| (a.name.clone(), a.data_type.clone()))
            .collect()
    }
}

/// Parses and checks `query` against a fresh catalog.
pub fn check(query: &str) -> Checked {
    let mut catalog = Catalog::from_declarations(DECLARATIONS).expect("valid declarations");
    let statements = parse_program(query).expect("valid query");
    let errors = {
        let mut analyzer = Analyzer::new(&mut catalog);
        analyzer.analyze(&statements);
        analyzer
            .diagnostics()
            .iter()
            .map(|d| d.error.clone())
            .collect()
    };
    Checked { catalog, errors }
}

/// Shorthand for an attribute pair.
pub fn attr(name: &str, data_type: DataType) -> (String, DataType) {
    (name.to_string(), data_type)
}
