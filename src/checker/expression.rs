//! Coarse type checking of selection predicates.

use crate::catalog::Relation;
use crate::parser::ast::{
    Additive, Chain, Comparison, ComparisonOp, Expression, Factor, LogicalOp, Multiplicative,
    Position, TypeTest,
};
use crate::types::CoarseType;

use super::diagnostic::{Diagnostics, SemanticError};

/// Evaluates scalar expressions to coarse types against one operand schema,
/// reporting incompatible operands as it goes.
pub struct ExpressionChecker<'a> {
    /// Schema identifiers resolve against.
    schema: &'a Relation,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> ExpressionChecker<'a> {
    /// Creates a checker resolving attributes in `schema`.
    #[must_use]
    pub fn new(schema: &'a Relation, diagnostics: &'a mut Diagnostics) -> Self {
        ExpressionChecker {
            schema,
            diagnostics,
        }
    }

    /// Checks a full predicate and returns the kind of its leftmost operand.
    pub fn check(&mut self, expr: &Expression) -> CoarseType {
        self.check_chain(expr, Self::check_comparison, Self::logical)
    }

    fn check_comparison(&mut self, comparison: &Comparison) -> CoarseType {
        self.check_chain(comparison, Self::check_type_test, Self::comparison)
    }

    fn check_type_test(&mut self, test: &TypeTest) -> CoarseType {
        if test.type_test.is_some() {
            // The tested operand is not inspected.
            return CoarseType::Boolean;
        }
        self.check_additive(&test.operand)
    }

    fn check_additive(&mut self, additive: &Additive) -> CoarseType {
        self.check_chain(additive, Self::check_multiplicative, Self::arithmetic)
    }

    fn check_multiplicative(&mut self, multiplicative: &Multiplicative) -> CoarseType {
        self.check_chain(multiplicative, Self::check_factor, Self::arithmetic)
    }

    fn check_factor(&mut self, factor: &Factor) -> CoarseType {
        match factor {
            Factor::Parenthesized(inner) => self.check_comparison(inner),
            Factor::Literal(literal) => literal.kind.coarse(),
            Factor::Attribute(attr) => {
                let schema = self.schema;
                match schema.get_attribute(&attr.name) {
                    Some(found) => found.data_type.coarse(),
                    None => {
                        self.diagnostics.report(
                            SemanticError::UnknownAttribute {
                                name: attr.name.clone(),
                            },
                            &attr.position,
                        );
                        CoarseType::Unknown
                    }
                }
            }
        }
    }

    /// Evaluates a chain as if it were right-nested: `a op (b op (c ...))`.
    ///
    /// Operand kinds are computed left to right, then each operator is
    /// combined with its left operand and the result of everything to its
    /// right, innermost operator first.
    fn check_chain<Op: Copy, T>(
        &mut self,
        chain: &Chain<Op, T>,
        operand: fn(&mut Self, &T) -> CoarseType,
        combine: fn(&mut Self, Op, &Position, CoarseType, CoarseType) -> CoarseType,
    ) -> CoarseType {
        let first = operand(self, &chain.first);
        let kinds: Vec<CoarseType> = chain
            .rest
            .iter()
            .map(|link| operand(self, &link.operand))
            .collect();

        let Some(&last) = kinds.last() else {
            return first;
        };
        let mut result = last;
        for (i, link) in chain.rest.iter().enumerate().rev() {
            let left = if i == 0 { first } else { kinds[i - 1] };
            result = combine(self, link.op, &link.position, left, result);
        }
        result
    }

    fn logical(
        &mut self,
        _op: LogicalOp,
        position: &Position,
        left: CoarseType,
        right: CoarseType,
    ) -> CoarseType {
        if !left.is_boolean() || !right.is_boolean() {
            self.diagnostics.report(
                SemanticError::NonBooleanOperand {
                    op: position.text.clone(),
                },
                position,
            );
        }
        left
    }

    /// Ordering operators need numeric operands; `=` and `<>` accept
    /// anything. The result is always boolean.
    fn comparison(
        &mut self,
        op: ComparisonOp,
        position: &Position,
        left: CoarseType,
        right: CoarseType,
    ) -> CoarseType {
        if op.is_ordering() && (!left.is_numeric() || !right.is_numeric()) {
            self.diagnostics.report(
                SemanticError::NonNumericComparison {
                    op: position.text.clone(),
                },
                position,
            );
        }
        CoarseType::Boolean
    }

    /// Both operands must be numeric. No promotion: the left kind wins.
    fn arithmetic<Op>(
        &mut self,
        _op: Op,
        position: &Position,
        left: CoarseType,
        right: CoarseType,
    ) -> CoarseType {
        if !left.is_numeric() || !right.is_numeric() {
            self.diagnostics.report(
                SemanticError::NonNumericArithmetic {
                    op: position.text.clone(),
                },
                position,
            );
        }
        left
    }
}
