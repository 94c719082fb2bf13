//! Declared attribute types and the coarse type lattice used by the checker.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Attribute types accepted in schema declarations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Variable-length character data.
    Varchar,
    /// Fixed-length character data.
    Char,
    /// Unbounded character data.
    Text,
    /// Character data declared as `STRING`.
    String,
    /// Integer declared as `INT`.
    Int,
    /// Integer.
    Integer,
    /// Double-precision float.
    Double,
    /// Fixed-point decimal.
    Decimal,
    /// Single-precision float.
    Float,
    /// 64-bit integer.
    Long,
    /// Binary large object.
    Blob,
    /// A type name outside the known vocabulary, kept verbatim (uppercased).
    Other(String),
}

impl DataType {
    /// Parses a declared type name. Matching is case-insensitive and every
    /// spelling keeps its own variant; unknown names are preserved as
    /// [`DataType::Other`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let upper = s.trim().to_uppercase();
        match upper.as_str() {
            "VARCHAR" => DataType::Varchar,
            "CHAR" => DataType::Char,
            "TEXT" => DataType::Text,
            "STRING" => DataType::String,
            "INT" => DataType::Int,
            "INTEGER" => DataType::Integer,
            "DOUBLE" => DataType::Double,
            "DECIMAL" => DataType::Decimal,
            "FLOAT" => DataType::Float,
            "LONG" => DataType::Long,
            "BLOB" => DataType::Blob,
            _ => DataType::Other(upper),
        }
    }

    /// Returns the declaration name of this type.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            DataType::Varchar => "VARCHAR",
            DataType::Char => "CHAR",
            DataType::Text => "TEXT",
            DataType::String => "STRING",
            DataType::Int => "INT",
            DataType::Integer => "INTEGER",
            DataType::Double => "DOUBLE",
            DataType::Decimal => "DECIMAL",
            DataType::Float => "FLOAT",
            DataType::Long => "LONG",
            DataType::Blob => "BLOB",
            DataType::Other(name) => name,
        }
    }

    /// Maps this declared type onto the coarse lattice.
    ///
    /// `BLOB` counts as numeric.
    #[must_use]
    pub fn coarse(&self) -> CoarseType {
        match self {
            DataType::Varchar | DataType::Char | DataType::Text | DataType::String => {
                CoarseType::String
            }
            DataType::Int
            | DataType::Integer
            | DataType::Double
            | DataType::Decimal
            | DataType::Float
            | DataType::Long
            | DataType::Blob => CoarseType::Numeric,
            DataType::Other(_) => CoarseType::Unknown,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value categories the scalar checker distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoarseType {
    Numeric,
    String,
    Boolean,
    /// Missing attribute or undeclared type. Satisfies no constraint.
    Unknown,
}

impl CoarseType {
    /// Returns whether this is the numeric category.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        self == CoarseType::Numeric
    }

    /// Returns whether this is the boolean category.
    #[must_use]
    pub fn is_boolean(self) -> bool {
        self == CoarseType::Boolean
    }
}

/// Lexical kind of a scalar literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Integer,
    Decimal,
    Binary,
    Hex,
    Octal,
    String,
    True,
    False,
}

impl LiteralKind {
    /// Maps the literal kind onto the coarse lattice.
    #[must_use]
    pub fn coarse(self) -> CoarseType {
        match self {
            LiteralKind::Integer
            | LiteralKind::Decimal
            | LiteralKind::Binary
            | LiteralKind::Hex
            | LiteralKind::Octal => CoarseType::Numeric,
            LiteralKind::String => CoarseType::String,
            LiteralKind::True | LiteralKind::False => CoarseType::Boolean,
        }
    }
}
