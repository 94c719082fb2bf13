//! Abstract Syntax Tree definitions for relational queries.

use crate::types::{DataType, LiteralKind};

/// Source location and text of the token a node was built from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Position {
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
    /// Source text of the token.
    pub text: String,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(line: usize, column: usize, text: impl Into<String>) -> Self {
        Position {
            line,
            column,
            text: text.into(),
        }
    }
}

/// A parsed top-level statement.
#[derive(Debug, Clone)]
pub enum Statement {
    /// Read-only query.
    Query(ReadOnly),
}

/// A relational expression that produces a schema.
#[derive(Debug, Clone)]
pub enum ReadOnly {
    /// Operator with a single operand.
    Unitary(Box<Unitary>),
    /// Operator with two operands.
    Binary(Box<Binary>),
}

/// Operand of a relational operator.
#[derive(Debug, Clone)]
pub enum Operand {
    /// Bare reference to a declared relation.
    Relation(RelationRef),
    /// Nested relational expression.
    Nested(Box<ReadOnly>),
}

/// Reference to a relation by name.
#[derive(Debug, Clone)]
pub struct RelationRef {
    pub name: String,
    pub position: Position,
}

impl RelationRef {
    /// Creates a relation reference.
    #[must_use]
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        RelationRef {
            name: name.into(),
            position,
        }
    }
}

/// Reference to an attribute by name.
#[derive(Debug, Clone)]
pub struct AttributeRef {
    pub name: String,
    pub position: Position,
}

impl AttributeRef {
    /// Creates an attribute reference.
    #[must_use]
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        AttributeRef {
            name: name.into(),
            position,
        }
    }
}

/// Unitary relational operation.
#[derive(Debug, Clone)]
pub struct Unitary {
    pub op: UnitaryOp,
    pub operand: Operand,
    /// Operator keyword.
    pub position: Position,
}

/// Unitary relational operators.
#[derive(Debug, Clone)]
pub enum UnitaryOp {
    /// `project(a, b)`.
    Project(Vec<AttributeRef>),
    /// `rename(a -> x, b -> y)`.
    Rename(Vec<RenamePair>),
    /// `select(predicate)`.
    Select(Expression),
    /// `closure(...)` / `<<...>>`.
    TransitiveClosure,
}

/// A single `from -> to` rename.
#[derive(Debug, Clone)]
pub struct RenamePair {
    pub from: AttributeRef,
    pub to: AttributeRef,
}

/// Binary relational operation.
#[derive(Debug, Clone)]
pub struct Binary {
    pub op: BinaryOp,
    pub left: Operand,
    pub right: Operand,
    /// Operator token.
    pub position: Position,
}

/// Binary relational operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Union,
    Intersection,
    Difference,
    Join,
    CrossJoin,
    Division,
}

impl BinaryOp {
    /// Returns the lowercase operator name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            BinaryOp::Union => "union",
            BinaryOp::Intersection => "intersection",
            BinaryOp::Difference => "difference",
            BinaryOp::Join => "join",
            BinaryOp::CrossJoin => "cross join",
            BinaryOp::Division => "division",
        }
    }
}

/// A left-to-right chain of operands joined by operators of one precedence.
#[derive(Debug, Clone)]
pub struct Chain<Op, T> {
    pub first: T,
    pub rest: Vec<Link<Op, T>>,
}

impl<Op, T> Chain<Op, T> {
    /// Creates a chain with a single operand.
    #[must_use]
    pub fn single(first: T) -> Self {
        Chain {
            first,
            rest: Vec::new(),
        }
    }

    /// Appends an operator and its right operand.
    #[must_use]
    pub fn then(mut self, op: Op, position: Position, operand: T) -> Self {
        self.rest.push(Link {
            op,
            position,
            operand,
        });
        self
    }
}

/// One `op operand` step of a [`Chain`].
#[derive(Debug, Clone)]
pub struct Link<Op, T> {
    pub op: Op,
    /// Operator token.
    pub position: Position,
    pub operand: T,
}

/// Selection predicate: `AND`/`OR` chain.
pub type Expression = Chain<LogicalOp, Comparison>;
/// Comparison chain over type tests.
pub type Comparison = Chain<ComparisonOp, TypeTest>;
/// `+`/`-` chain.
pub type Additive = Chain<AdditiveOp, Multiplicative>;
/// `*`, `/`, `^`, `MOD` chain.
pub type Multiplicative = Chain<MultiplicativeOp, Factor>;

/// An additive expression optionally tested with `instanceof TYPE`.
#[derive(Debug, Clone)]
pub struct TypeTest {
    pub operand: Additive,
    pub type_test: Option<DataType>,
}

/// Innermost scalar term.
#[derive(Debug, Clone)]
pub enum Factor {
    /// `( comparison )`.
    Parenthesized(Box<Comparison>),
    /// Attribute of the operand schema.
    Attribute(AttributeRef),
    /// Literal constant.
    Literal(Literal),
}

/// Scalar literal.
#[derive(Debug, Clone)]
pub struct Literal {
    pub kind: LiteralKind,
    pub position: Position,
}

/// Logical operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    Neq,
    Lt,
    Gt,
    Lte,
    Gte,
}

impl ComparisonOp {
    /// Parses a comparison operator from its source text.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "=" => Some(ComparisonOp::Eq),
            "<>" | "!=" | "≠" => Some(ComparisonOp::Neq),
            "<" => Some(ComparisonOp::Lt),
            ">" => Some(ComparisonOp::Gt),
            "<=" | "≤" => Some(ComparisonOp::Lte),
            ">=" | "≥" => Some(ComparisonOp::Gte),
            _ => None,
        }
    }

    /// Returns true for `<`, `>`, `<=`, `>=`.
    #[must_use]
    pub fn is_ordering(&self) -> bool {
        !matches!(self, ComparisonOp::Eq | ComparisonOp::Neq)
    }
}

/// Additive operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdditiveOp {
    Add,
    Sub,
}

/// Multiplicative operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiplicativeOp {
    Mul,
    Div,
    Pow,
    Mod,
}

/// One `Relation.attribute:TYPE` schema declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub relation: String,
    pub attribute: String,
    pub data_type: DataType,
}
