//! Per-operator rules for relational expressions.

use crate::catalog::{Attribute, Relation, RelationId};
use crate::parser::ast::{
    AttributeRef, Binary, BinaryOp, Expression, Operand, ReadOnly, RelationRef, RenamePair,
    Unitary, UnitaryOp,
};

use super::diagnostic::SemanticError;
use super::expression::ExpressionChecker;
use super::semantic::Analyzer;
use super::slots::SlotId;

impl Analyzer<'_> {
    /// Allocates the result slot for `node`, checks it, and returns the slot.
    pub(super) fn check_read_only(&mut self, node: &ReadOnly) -> SlotId {
        let slot = self.slots.allocate(self.catalog);
        match node {
            ReadOnly::Unitary(unitary) => self.check_unitary(unitary, slot),
            ReadOnly::Binary(binary) => self.check_binary(binary, slot),
        }
        slot
    }

    fn check_unitary(&mut self, node: &Unitary, slot: SlotId) {
        let source = self.resolve_unitary_operand(&node.operand);
        let schema = self.schema_of(source);
        match &node.op {
            UnitaryOp::Project(attributes) => self.check_projection(attributes, slot, &schema),
            UnitaryOp::Rename(pairs) => self.check_rename(pairs, slot, &schema),
            UnitaryOp::Select(predicate) => self.check_selection(predicate, slot, &schema),
            UnitaryOp::TransitiveClosure => {
                if schema.attribute_count() != 2 {
                    self.diagnostics.report(
                        SemanticError::InvalidArity {
                            found: schema.attribute_count(),
                        },
                        &node.position,
                    );
                }
                if let Some(id) = source {
                    self.alias_slot(slot, id);
                }
            }
        }
    }

    /// A nested operand gets the next slot; a bare relation is read directly
    /// so the operator's own slot is never aliased onto a persistent relation.
    fn resolve_unitary_operand(&mut self, operand: &Operand) -> Option<RelationId> {
        match operand {
            Operand::Nested(inner) => {
                let operand_slot = self.check_read_only(inner);
                self.slot_relation_id(operand_slot)
            }
            Operand::Relation(relation) => self.lookup_relation(relation),
        }
    }

    fn check_projection(&mut self, attributes: &[AttributeRef], slot: SlotId, source: &Relation) {
        for attr in attributes {
            match source.get_attribute(&attr.name) {
                Some(found) => self.add_to_slot(slot, found),
                None => self.report_unknown_attribute(attr),
            }
        }
    }

    fn check_rename(&mut self, pairs: &[RenamePair], slot: SlotId, source: &Relation) {
        for pair in pairs {
            match source.get_attribute(&pair.from.name) {
                Some(found) => {
                    let renamed = Attribute::new(pair.to.name.clone(), found.data_type.clone());
                    self.add_to_slot(slot, &renamed);
                }
                None => self.report_unknown_attribute(&pair.from),
            }
        }
    }

    fn check_selection(&mut self, predicate: &Expression, slot: SlotId, source: &Relation) {
        ExpressionChecker::new(source, &mut self.diagnostics).check(predicate);
        for attr in source.attributes() {
            self.add_to_slot(slot, attr);
        }
    }

    fn check_binary(&mut self, node: &Binary, slot: SlotId) {
        let left = self.check_binary_operand(&node.left);
        let right = self.check_binary_operand(&node.right);
        let dividend = self.schema_of(self.slot_relation_id(left));
        let divisor = self.schema_of(self.slot_relation_id(right));

        match node.op {
            BinaryOp::Union | BinaryOp::Intersection | BinaryOp::Difference => {
                if dividend.attribute_count() == divisor.attribute_count() {
                    if let Some(id) = self.slot_relation_id(left) {
                        self.alias_slot(slot, id);
                    }
                } else {
                    self.diagnostics.report(
                        SemanticError::ArityMismatch {
                            operator: node.op.name(),
                        },
                        &node.position,
                    );
                }
            }
            BinaryOp::Join | BinaryOp::CrossJoin => {
                for attr in dividend.attributes().iter().chain(divisor.attributes()) {
                    self.add_to_slot(slot, attr);
                }
            }
            BinaryOp::Division => {
                let larger = dividend.attribute_count() > divisor.attribute_count();
                if larger && divisor.attribute_names().all(|n| dividend.has_attribute(n)) {
                    for attr in dividend.attributes() {
                        if !divisor.has_attribute(&attr.name) {
                            self.add_to_slot(slot, attr);
                        }
                    }
                } else {
                    self.diagnostics.report(
                        SemanticError::InvalidDivision {
                            token: node.position.text.clone(),
                        },
                        &node.position,
                    );
                }
            }
        }
    }

    /// Binary operands always own a slot, even a bare relation name.
    fn check_binary_operand(&mut self, operand: &Operand) -> SlotId {
        match operand {
            Operand::Nested(inner) => self.check_read_only(inner),
            Operand::Relation(relation) => {
                let slot = self.slots.allocate(self.catalog);
                if let Some(id) = self.lookup_relation(relation) {
                    self.alias_slot(slot, id);
                }
                slot
            }
        }
    }

    fn lookup_relation(&mut self, relation: &RelationRef) -> Option<RelationId> {
        let id = self.catalog.relation_id(&relation.name);
        if id.is_none() {
            self.diagnostics.report(
                SemanticError::UnknownRelation {
                    name: relation.name.clone(),
                },
                &relation.position,
            );
        }
        id
    }

    fn report_unknown_attribute(&mut self, attr: &AttributeRef) {
        self.diagnostics.report(
            SemanticError::UnknownAttribute {
                name: attr.name.clone(),
            },
            &attr.position,
        );
    }

    fn slot_relation_id(&self, slot: SlotId) -> Option<RelationId> {
        self.catalog.relation_id(&self.slots.name(slot))
    }

    /// Snapshot of a relation's schema; empty when there is none.
    fn schema_of(&self, id: Option<RelationId>) -> Relation {
        id.map(|id| self.catalog.relation(id).clone())
            .unwrap_or_default()
    }

    fn add_to_slot(&mut self, slot: SlotId, attr: &Attribute) {
        let name = self.slots.name(slot);
        if let Some(relation) = self.catalog.get_relation_mut(&name) {
            relation.add_attribute(&attr.name, attr.data_type.clone());
        }
    }

    fn alias_slot(&mut self, slot: SlotId, id: RelationId) {
        let name = self.slots.name(slot);
        log::debug!("slot {slot} aliases relation #{}", id.index());
        self.catalog.replace_relation(&name, id);
    }
}
