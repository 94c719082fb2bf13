//! Catalog for managing relation schemas.

mod schema;

pub use schema::{Attribute, Catalog, Relation, RelationId};
