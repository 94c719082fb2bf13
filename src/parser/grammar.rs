//! Pest parser integration for the relational query grammar.

use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;

use crate::error::{Result, RqlError};
use crate::parser::ast::{
    AdditiveOp, AttributeRef, Binary, BinaryOp, Chain, Comparison, ComparisonOp, Declaration,
    Expression, Factor, Literal, LogicalOp, MultiplicativeOp, Operand, Position, ReadOnly,
    RelationRef, RenamePair, Statement, TypeTest, Unitary, UnitaryOp,
};
use crate::types::{DataType, LiteralKind};

#[derive(Parser)]
#[grammar = "parser/grammar.pest"]
struct RqlParser;

/// Parses a `;`-separated list of relational statements.
///
/// # Errors
///
/// Returns a `ParseError` if the text is syntactically invalid.
pub fn parse_program(source: &str) -> Result<Vec<Statement>> {
    let mut pairs = RqlParser::parse(Rule::program, source).map_err(parse_error)?;
    let program = next_pair(&mut pairs, "program")?;
    program
        .into_inner()
        .filter(|p| p.as_rule() == Rule::statement)
        .map(build_statement)
        .collect()
}

/// Parses a `Relation.attribute:TYPE;` declaration list.
///
/// # Errors
///
/// Returns a `ParseError` if the text is syntactically invalid.
pub fn parse_declarations(source: &str) -> Result<Vec<Declaration>> {
    let mut pairs = RqlParser::parse(Rule::declarations, source).map_err(parse_error)?;
    let list = next_pair(&mut pairs, "declarations")?;
    list.into_inner()
        .filter(|p| p.as_rule() == Rule::declaration)
        .map(|decl| {
            let mut parts = decl.into_inner();
            let relation = next_pair(&mut parts, "relation name")?.as_str().to_string();
            let attribute = next_pair(&mut parts, "attribute name")?.as_str().to_string();
            let data_type = DataType::parse(next_pair(&mut parts, "type name")?.as_str());
            Ok(Declaration {
                relation,
                attribute,
                data_type,
            })
        })
        .collect()
}

fn parse_error(e: pest::error::Error<Rule>) -> RqlError {
    let (line, col) = match e.line_col {
        pest::error::LineColLocation::Pos((l, c))
        | pest::error::LineColLocation::Span((l, c), _) => (l, c),
    };
    RqlError::ParseError {
        line,
        col,
        message: e.variant.message().to_string(),
    }
}

fn position(pair: &Pair<Rule>) -> Position {
    let (line, column) = pair.as_span().start_pos().line_col();
    Position::new(line, column, pair.as_str())
}

fn next_pair<'i>(pairs: &mut Pairs<'i, Rule>, what: &str) -> Result<Pair<'i, Rule>> {
    pairs.next().ok_or_else(|| RqlError::ParseError {
        line: 0,
        col: 0,
        message: format!("Missing {what}"),
    })
}

fn unexpected(pair: &Pair<Rule>) -> RqlError {
    let (line, col) = pair.as_span().start_pos().line_col();
    RqlError::ParseError {
        line,
        col,
        message: format!("Unexpected {:?}: '{}'", pair.as_rule(), pair.as_str()),
    }
}

fn build_statement(pair: Pair<Rule>) -> Result<Statement> {
    let inner = next_pair(&mut pair.into_inner(), "query")?;
    match inner.as_rule() {
        Rule::read_only => Ok(Statement::Query(build_read_only(inner)?)),
        // Redundant parentheses around the whole query.
        Rule::statement => build_statement(inner),
        _ => Err(unexpected(&inner)),
    }
}

fn build_read_only(pair: Pair<Rule>) -> Result<ReadOnly> {
    let inner = next_pair(&mut pair.into_inner(), "relational operation")?;
    match inner.as_rule() {
        Rule::binary => Ok(ReadOnly::Binary(Box::new(build_binary(inner)?))),
        Rule::unitary => Ok(ReadOnly::Unitary(Box::new(build_unitary(inner)?))),
        _ => Err(unexpected(&inner)),
    }
}

fn build_operand(pair: Pair<Rule>) -> Result<Operand> {
    match pair.as_rule() {
        Rule::relation => Ok(Operand::Relation(RelationRef::new(
            pair.as_str(),
            position(&pair),
        ))),
        Rule::read_only => Ok(Operand::Nested(Box::new(build_read_only(pair)?))),
        Rule::unitary_operand | Rule::binary_operand => {
            build_operand(next_pair(&mut pair.into_inner(), "operand")?)
        }
        _ => Err(unexpected(&pair)),
    }
}

fn build_binary(pair: Pair<Rule>) -> Result<Binary> {
    let mut inner = pair.into_inner();
    let left = build_operand(next_pair(&mut inner, "left operand")?)?;
    let op_pair = next_pair(&mut next_pair(&mut inner, "operator")?.into_inner(), "operator")?;
    let op = match op_pair.as_rule() {
        Rule::union_op => BinaryOp::Union,
        Rule::intersect_op => BinaryOp::Intersection,
        Rule::difference_op => BinaryOp::Difference,
        Rule::join_op => BinaryOp::Join,
        Rule::cross_op => BinaryOp::CrossJoin,
        Rule::divide_op => BinaryOp::Division,
        _ => return Err(unexpected(&op_pair)),
    };
    let right = build_operand(next_pair(&mut inner, "right operand")?)?;
    Ok(Binary {
        op,
        left,
        right,
        position: position(&op_pair),
    })
}

fn build_unitary(pair: Pair<Rule>) -> Result<Unitary> {
    let node = next_pair(&mut pair.into_inner(), "unitary operation")?;
    let rule = node.as_rule();
    let mut inner = node.into_inner();
    let keyword = next_pair(&mut inner, "operator")?;
    let position = position(&keyword);

    let mut attributes = Vec::new();
    let mut renames = Vec::new();
    let mut predicate = None;
    let mut operand = None;

    for part in inner {
        match part.as_rule() {
            Rule::attribute => attributes.push(build_attribute(&part)),
            Rule::rename_pair => {
                let mut sides = part.into_inner();
                let from = build_attribute(&next_pair(&mut sides, "renamed attribute")?);
                let to = build_attribute(&next_pair(&mut sides, "new attribute name")?);
                renames.push(RenamePair { from, to });
            }
            Rule::expression => predicate = Some(build_expression(part)?),
            Rule::unitary_operand | Rule::read_only | Rule::relation => {
                operand = Some(build_operand(part)?);
            }
            _ => return Err(unexpected(&part)),
        }
    }

    let op = match rule {
        Rule::project => UnitaryOp::Project(attributes),
        Rule::rename => UnitaryOp::Rename(renames),
        Rule::select => UnitaryOp::Select(predicate.ok_or_else(|| RqlError::ParseError {
            line: position.line,
            col: position.column,
            message: "Selection requires a predicate".into(),
        })?),
        Rule::closure => UnitaryOp::TransitiveClosure,
        _ => return Err(unexpected(&keyword)),
    };
    let operand = operand.ok_or_else(|| RqlError::ParseError {
        line: position.line,
        col: position.column,
        message: "Operation requires an operand".into(),
    })?;

    Ok(Unitary {
        op,
        operand,
        position,
    })
}

fn build_attribute(pair: &Pair<Rule>) -> AttributeRef {
    AttributeRef::new(pair.as_str(), position(pair))
}

/// Builds a same-precedence chain: `operand (operator operand)*`.
fn build_chain<'i, Op, T>(
    pair: Pair<'i, Rule>,
    operand: impl Fn(Pair<'i, Rule>) -> Result<T>,
    operator: impl Fn(&Pair<'i, Rule>) -> Result<Op>,
) -> Result<Chain<Op, T>> {
    let mut inner = pair.into_inner();
    let mut chain = Chain::single(operand(next_pair(&mut inner, "operand")?)?);
    while let Some(op_pair) = inner.next() {
        let op = operator(&op_pair)?;
        let rhs = operand(next_pair(&mut inner, "right operand")?)?;
        chain = chain.then(op, position(&op_pair), rhs);
    }
    Ok(chain)
}

fn build_expression(pair: Pair<Rule>) -> Result<Expression> {
    build_chain(pair, build_comparison, |op| {
        let inner = next_pair(&mut op.clone().into_inner(), "logical operator")?;
        match inner.as_rule() {
            Rule::and_op => Ok(LogicalOp::And),
            Rule::or_op => Ok(LogicalOp::Or),
            _ => Err(unexpected(&inner)),
        }
    })
}

fn build_comparison(pair: Pair<Rule>) -> Result<Comparison> {
    build_chain(pair, build_type_test, |op| {
        ComparisonOp::parse(op.as_str()).ok_or_else(|| unexpected(op))
    })
}

fn build_type_test(pair: Pair<Rule>) -> Result<TypeTest> {
    let mut inner = pair.into_inner();
    let operand = build_chain(
        next_pair(&mut inner, "additive expression")?,
        |multiplicative| {
            build_chain(multiplicative, build_factor, |op| {
                match op.as_str().to_lowercase().as_str() {
                    "*" | "×" => Ok(MultiplicativeOp::Mul),
                    "/" | "÷" => Ok(MultiplicativeOp::Div),
                    "^" => Ok(MultiplicativeOp::Pow),
                    "%" | "mod" => Ok(MultiplicativeOp::Mod),
                    _ => Err(unexpected(op)),
                }
            })
        },
        |op| match op.as_str() {
            "+" => Ok(AdditiveOp::Add),
            "-" => Ok(AdditiveOp::Sub),
            _ => Err(unexpected(op)),
        },
    )?;

    // `instanceof_kw type_name`
    let type_test = inner
        .find(|p| p.as_rule() == Rule::type_name)
        .map(|p| DataType::parse(p.as_str()));

    Ok(TypeTest { operand, type_test })
}

fn build_factor(pair: Pair<Rule>) -> Result<Factor> {
    let inner = next_pair(&mut pair.into_inner(), "factor")?;
    match inner.as_rule() {
        Rule::comparison => Ok(Factor::Parenthesized(Box::new(build_comparison(inner)?))),
        Rule::attribute => Ok(Factor::Attribute(build_attribute(&inner))),
        Rule::literal => {
            let kind_pair = next_pair(&mut inner.clone().into_inner(), "literal")?;
            let kind = match kind_pair.as_rule() {
                Rule::string_lit => LiteralKind::String,
                Rule::bin_lit => LiteralKind::Binary,
                Rule::hex_lit => LiteralKind::Hex,
                Rule::oct_lit => LiteralKind::Octal,
                Rule::decimal_lit => LiteralKind::Decimal,
                Rule::integer_lit => LiteralKind::Integer,
                Rule::true_lit => LiteralKind::True,
                Rule::false_lit => LiteralKind::False,
                _ => return Err(unexpected(&kind_pair)),
            };
            Ok(Factor::Literal(Literal {
                kind,
                position: position(&inner),
            }))
        }
        _ => Err(unexpected(&inner)),
    }
}
