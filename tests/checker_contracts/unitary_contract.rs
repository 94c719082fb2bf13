//! Contract tests for projection, selection, rename and transitive closure.

use rql::checker::SemanticError;
use rql::types::DataType;

use super::{attr, check};

#[test]
fn test_project_existing_attributes() {
    // Contract: 0 errors, result schema = requested attributes in requested order
    let checked = check("project(age, idPeople)(People)");
    assert_eq!(checked.count(), 0);
    assert_eq!(
        checked.slot(1),
        vec![
            attr("age", DataType::Integer),
            attr("idPeople", DataType::Integer)
        ]
    );
}

#[test]
fn test_project_missing_attribute() {
    let checked = check("project(ghost)(People)");
    assert_eq!(
        checked.errors,
        vec![SemanticError::UnknownAttribute {
            name: "ghost".into()
        }]
    );
    assert!(checked.slot(1).is_empty());
}

#[test]
fn test_project_missing_attribute_keeps_going() {
    // One error per missing name; present names still land in the schema.
    let checked = check("project(ghost, name, phantom)(People)");
    assert_eq!(checked.count(), 2);
    assert_eq!(checked.slot(1), vec![attr("name", DataType::Varchar)]);
}

#[test]
fn test_project_from_missing_relation() {
    // Contract: relation error + attribute error
    let checked = check("project(ghost)(Ghost)");
    assert_eq!(
        checked.errors,
        vec![
            SemanticError::UnknownRelation {
                name: "Ghost".into()
            },
            SemanticError::UnknownAttribute {
                name: "ghost".into()
            },
        ]
    );
}

#[test]
fn test_select_valid_predicate() {
    let checked = check("select(idPeople > 5 or idPeople < 10)(People)");
    assert_eq!(checked.count(), 0);
    // Selection keeps the operand's shape.
    assert_eq!(
        checked.slot(1),
        vec![
            attr("idPeople", DataType::Integer),
            attr("name", DataType::Varchar),
            attr("age", DataType::Integer),
        ]
    );
}

#[test]
fn test_select_string_equality() {
    assert_eq!(check("select(name = \"Jessica\")(People)").count(), 0);
}

#[test]
fn test_select_missing_attribute() {
    let checked = check("select(idPeople = nonExistent)(People)");
    assert_eq!(checked.count(), 1);
    assert_eq!(checked.slot(1).len(), 3);
}

#[test]
fn test_select_missing_relation() {
    // Relation error plus the attribute error from the empty schema.
    assert_eq!(check("select(idPeople = 10)(nonExistent)").count(), 2);
}

#[test]
fn test_select_non_numeric_ordering() {
    let checked = check("select(name > 3)(People)");
    assert_eq!(
        checked.errors,
        vec![SemanticError::NonNumericComparison { op: ">".into() }]
    );
}

#[test]
fn test_select_over_nested_operand() {
    let checked = check("select(years >= 18)(rename(age -> years)(People))");
    assert_eq!(checked.count(), 0);
    assert_eq!(checked.slot(1), vec![attr("years", DataType::Integer)]);
}

#[test]
fn test_rename_existing_attribute() {
    let checked = check("rename(idPeople -> id)(People)");
    assert_eq!(checked.count(), 0);
    assert_eq!(checked.slot(1), vec![attr("id", DataType::Integer)]);
}

#[test]
fn test_rename_missing_attribute() {
    let checked = check("rename(idNonExistent -> id)(People)");
    assert_eq!(
        checked.errors,
        vec![SemanticError::UnknownAttribute {
            name: "idNonExistent".into()
        }]
    );
    assert!(checked.slot(1).is_empty());
}

#[test]
fn test_rename_from_missing_relation() {
    assert_eq!(check("rename(idPeople -> id)(NonExistent)").count(), 2);
}

#[test]
fn test_transitive_closure_binary_relation() {
    let checked = check("<<Composition>>");
    assert_eq!(checked.count(), 0);
    assert_eq!(checked.slot(1).len(), 2);
}

#[test]
fn test_transitive_closure_wrong_arity() {
    let checked = check("<<People>>");
    assert_eq!(checked.errors, vec![SemanticError::InvalidArity { found: 3 }]);
}

#[test]
fn test_transitive_closure_missing_relation() {
    assert_eq!(check("<<nonExistent>>").count(), 2);
}

#[test]
fn test_transitive_closure_over_nested_operand() {
    let checked = check("closure(project(idPeople, age)(People))");
    assert_eq!(checked.count(), 0);
    assert_eq!(checked.slot(1), checked.slot(2));
}

#[test]
fn test_select_negative_literal() {
    assert_eq!(check("select(age > -1 and idPeople * -2 < 0)(People)").count(), 0);
}

#[test]
fn test_parenthesized_operand_reads_relation() {
    let checked = check("project(name)((People))");
    assert_eq!(checked.count(), 0);
    assert_eq!(checked.slot(1), vec![attr("name", DataType::Varchar)]);
    // The bare relation inside the extra parentheses owns no slot.
    assert!(!checked.catalog.has_relation("$slot2"));
}

#[test]
fn test_parenthesized_statement() {
    let checked = check("(rename(age -> years)(People))");
    assert_eq!(checked.count(), 0);
    assert_eq!(checked.slot(1), vec![attr("years", DataType::Integer)]);
}
