//! Contract tests for the set operators, joins and division.

use rql::checker::SemanticError;
use rql::types::DataType;

use super::{attr, check};

#[test]
fn test_set_operators_equal_arity() {
    // Contract: 0 errors and the result aliases the left operand
    for op in ["UNION", "INTERSECT", "DIFFERENCE"] {
        let checked = check(&format!("Sale {op} ItemSale"));
        assert_eq!(checked.count(), 0, "{op}");
        assert_eq!(
            checked.catalog.relation_id("$slot1"),
            checked.catalog.relation_id("Sale"),
            "{op}"
        );
    }
}

#[test]
fn test_set_operators_arity_mismatch() {
    for (op, name) in [
        ("UNION", "union"),
        ("INTERSECT", "intersection"),
        ("MINUS", "difference"),
    ] {
        let checked = check(&format!("People {op} Composition"));
        assert_eq!(
            checked.errors,
            vec![SemanticError::ArityMismatch { operator: name }],
            "{op}"
        );
        assert!(checked.slot(1).is_empty(), "{op}");
    }
}

#[test]
fn test_union_of_nested_operands() {
    let checked = check("(project(idPeople)(People)) UNION (project(idSale)(Sale))");
    assert_eq!(checked.count(), 0);
    // Slot 1 aliases slot 2, the left operand.
    assert_eq!(
        checked.catalog.relation_id("$slot1"),
        checked.catalog.relation_id("$slot2")
    );
    assert_eq!(checked.slot(1), vec![attr("idPeople", DataType::Integer)]);
    assert_eq!(checked.slot(3), vec![attr("idSale", DataType::Integer)]);
}

#[test]
fn test_join_merges_schemas() {
    let checked = check("People [] Sale");
    assert_eq!(checked.count(), 0);
    assert_eq!(
        checked.slot(1),
        vec![
            attr("idPeople", DataType::Integer),
            attr("name", DataType::Varchar),
            attr("age", DataType::Integer),
            attr("idSale", DataType::Integer),
            attr("saleDate", DataType::Varchar),
        ]
    );
}

#[test]
fn test_cross_join_later_writer_wins() {
    // Product.name (VARCHAR) and People.name collide; the right side is written last.
    let checked = check("(rename(age -> name)(People)) CROSS Product");
    assert_eq!(checked.count(), 0);
    assert_eq!(
        checked.slot(1),
        vec![
            attr("name", DataType::Varchar),
            attr("idProduct", DataType::Integer),
            attr("price", DataType::Double),
        ]
    );
}

#[test]
fn test_join_with_missing_relation() {
    let checked = check("People JOIN Ghost");
    assert_eq!(
        checked.errors,
        vec![SemanticError::UnknownRelation {
            name: "Ghost".into()
        }]
    );
    assert_eq!(checked.slot(1).len(), 3);
    assert!(checked.slot(3).is_empty());
}

#[test]
fn test_division_of_projections() {
    let checked = check("(project(a1, b1)(A)) DIVIDE (project(b1)(B))");
    assert_eq!(checked.count(), 0);
    assert_eq!(checked.slot(1), vec![attr("a1", DataType::Integer)]);
}

#[test]
fn test_division_of_relations() {
    let checked = check("A DIVIDE B");
    assert_eq!(checked.count(), 0);
    assert_eq!(checked.slot(1), vec![attr("a1", DataType::Integer)]);

    let checked = check("(project(idSale, idProduct)(ItemSale)) ÷ (project(idSale)(Sale))");
    assert_eq!(checked.count(), 0);
    assert_eq!(checked.slot(1), vec![attr("idProduct", DataType::Integer)]);
}

#[test]
fn test_division_divisor_not_smaller() {
    let checked = check("B DIVIDE A");
    assert_eq!(
        checked.errors,
        vec![SemanticError::InvalidDivision {
            token: "DIVIDE".into()
        }]
    );
    assert!(checked.slot(1).is_empty());
}

#[test]
fn test_division_divisor_not_subset() {
    // Two names missing from the dividend, still a single error.
    let checked = check("People DIVIDE Composition");
    assert_eq!(checked.count(), 1);
    assert!(matches!(
        checked.errors[0],
        SemanticError::InvalidDivision { .. }
    ));
    assert!(checked.slot(1).is_empty());
}

#[test]
fn test_binary_slots_are_contiguous() {
    // Slot 1: join, 2: left projection, 3: right bare relation.
    let checked = check("(project(idPeople)(People)) JOIN Sale");
    assert_eq!(checked.slot(2), vec![attr("idPeople", DataType::Integer)]);
    assert_eq!(
        checked.catalog.relation_id("$slot3"),
        checked.catalog.relation_id("Sale")
    );
}
