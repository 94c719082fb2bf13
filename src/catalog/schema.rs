//! Relation schemas and the catalog that names them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RqlError};
use crate::parser;
use crate::types::DataType;

/// Handle to a relation stored in the catalog arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationId(usize);

impl RelationId {
    /// Returns the arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Registry of relation schemas keyed by name.
///
/// Relations live in an arena; names map to arena handles. Binding a second
/// name to an existing handle (see [`Catalog::replace_relation`]) aliases the
/// relation, so mutations through either name are visible through both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Relation arena. Entries are never removed.
    relations: Vec<Relation>,
    /// Name -> arena handle.
    names: HashMap<String, RelationId>,
}

impl Catalog {
    /// Creates a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Catalog {
            relations: Vec::new(),
            names: HashMap::new(),
        }
    }

    /// Builds a catalog from a declaration list such as
    /// `"People.idPeople:INTEGER; People.name:VARCHAR;"`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` for malformed text, or a `SchemaError` if the
    /// same attribute is declared twice for one relation.
    pub fn from_declarations(source: &str) -> Result<Self> {
        let mut catalog = Catalog::new();
        for decl in parser::parse_declarations(source)? {
            catalog.declare(&decl.relation, &decl.attribute, decl.data_type)?;
        }
        Ok(catalog)
    }

    /// Declares an attribute on a persistent relation, creating the relation
    /// on first use.
    ///
    /// # Errors
    ///
    /// Returns a `SchemaError` if a name is empty or the attribute already
    /// exists on that relation.
    pub fn declare(&mut self, relation: &str, attribute: &str, data_type: DataType) -> Result<()> {
        if relation.is_empty() || attribute.is_empty() {
            return Err(RqlError::SchemaError(
                "Relation and attribute names cannot be empty".into(),
            ));
        }
        let id = match self.relation_id(relation) {
            Some(id) => id,
            None => self.add_relation(relation),
        };
        let rel = self.relation_mut(id);
        if rel.has_attribute(attribute) {
            return Err(RqlError::SchemaError(format!(
                "Attribute '{attribute}' declared twice on relation '{relation}'"
            )));
        }
        rel.add_attribute(attribute, data_type);
        Ok(())
    }

    /// Checks if a relation name is bound.
    #[must_use]
    pub fn has_relation(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Returns the handle bound to `name`.
    #[must_use]
    pub fn relation_id(&self, name: &str) -> Option<RelationId> {
        self.names.get(name).copied()
    }

    /// Retrieves the relation bound to `name`.
    #[must_use]
    pub fn get_relation(&self, name: &str) -> Option<&Relation> {
        self.relation_id(name).map(|id| self.relation(id))
    }

    /// Retrieves the relation bound to `name` for mutation.
    pub fn get_relation_mut(&mut self, name: &str) -> Option<&mut Relation> {
        let id = self.relation_id(name)?;
        Some(self.relation_mut(id))
    }

    /// Binds `name` to a fresh empty relation, returning its handle.
    ///
    /// An existing binding for `name` is replaced; the relation it pointed at
    /// stays in the arena and remains reachable through any other alias.
    pub fn add_relation(&mut self, name: &str) -> RelationId {
        let id = RelationId(self.relations.len());
        self.relations.push(Relation::new());
        self.names.insert(name.to_string(), id);
        id
    }

    /// Rebinds `name` to the relation behind `id`.
    pub fn replace_relation(&mut self, name: &str, id: RelationId) {
        self.names.insert(name.to_string(), id);
    }

    /// Returns the relation behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this catalog.
    #[must_use]
    pub fn relation(&self, id: RelationId) -> &Relation {
        &self.relations[id.0]
    }

    /// Returns the relation behind a handle for mutation.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this catalog.
    pub fn relation_mut(&mut self, id: RelationId) -> &mut Relation {
        &mut self.relations[id.0]
    }

    /// Returns all bound names, sorted.
    #[must_use]
    pub fn relation_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Serializes the catalog to bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| RqlError::CatalogError(format!("Failed to serialize catalog: {e}")))
    }

    /// Deserializes a catalog from bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        bincode::deserialize(data)
            .map_err(|e| RqlError::CatalogError(format!("Failed to deserialize catalog: {e}")))
    }
}

/// Attribute schema of a relation, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    attributes: Vec<Attribute>,
}

impl Relation {
    /// Creates an empty relation.
    #[must_use]
    pub fn new() -> Self {
        Relation {
            attributes: Vec::new(),
        }
    }

    /// Adds an attribute. If the name already exists its type is overwritten
    /// in place and its position is kept.
    pub fn add_attribute(&mut self, name: &str, data_type: DataType) {
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.data_type = data_type,
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                data_type,
            }),
        }
    }

    /// Finds an attribute by name.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Returns whether an attribute with this name exists.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Returns the attributes in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Returns the attribute names in insertion order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }
}

/// A named, typed column of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name.
    pub name: String,
    /// Declared type.
    pub data_type: DataType,
}

impl Attribute {
    /// Creates a new attribute.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Attribute {
            name: name.into(),
            data_type,
        }
    }
}
