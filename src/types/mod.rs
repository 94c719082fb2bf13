//! Type definitions shared by the catalog, parser and checker.

mod data_type;

pub use data_type::{CoarseType, DataType, LiteralKind};
