//! Parser for relational queries and schema declarations.

pub mod ast;
mod grammar;

pub use grammar::{parse_declarations, parse_program};
