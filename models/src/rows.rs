// models/src/rows.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::{RepoError, RepoResult};
use crate::properties::PropertyValue;
use crate::vertices::Vertex;

/// One result row: ordered named fields as returned by the graph store.
///
/// Rows produced from a vertex carry an `id` field plus every node property,
/// property names sorted for determinism.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    fields: Vec<(String, PropertyValue)>,
}

impl Row {
    pub fn new(fields: Vec<(String, PropertyValue)>) -> Self {
        Row { fields }
    }

    /// Projects a vertex into a row: `id` first, then properties by name.
    pub fn from_vertex(vertex: &Vertex) -> Self {
        let mut fields = vec![("id".to_string(), PropertyValue::Uuid(vertex.id))];
        let mut names: Vec<&String> = vertex.properties.keys().collect();
        names.sort();
        for name in names {
            fields.push((name.clone(), vertex.properties[name].clone()));
        }
        Row { fields }
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    fn required(&self, name: &str) -> RepoResult<&PropertyValue> {
        self.get(name)
            .ok_or_else(|| RepoError::Store(format!("result row has no field '{}'", name)))
    }

    fn mismatch(name: &str, expected: &str, found: &PropertyValue) -> RepoError {
        RepoError::Store(format!(
            "result field '{}' has unexpected type, expected {}, found {}",
            name,
            expected,
            found.kind()
        ))
    }

    pub fn get_str(&self, name: &str) -> RepoResult<&str> {
        let value = self.required(name)?;
        value
            .as_str()
            .ok_or_else(|| Self::mismatch(name, "string", value))
    }

    pub fn get_i64(&self, name: &str) -> RepoResult<i64> {
        let value = self.required(name)?;
        value
            .as_i64()
            .ok_or_else(|| Self::mismatch(name, "integer", value))
    }

    pub fn get_timestamp(&self, name: &str) -> RepoResult<DateTime<Utc>> {
        let value = self.required(name)?;
        value
            .as_timestamp()
            .ok_or_else(|| Self::mismatch(name, "timestamp", value))
    }

    pub fn get_uuid(&self, name: &str) -> RepoResult<Uuid> {
        let value = self.required(name)?;
        value
            .as_uuid()
            .ok_or_else(|| Self::mismatch(name, "uuid", value))
    }

    /// `None` when the field is absent, error only on a type mismatch.
    pub fn opt_str(&self, name: &str) -> RepoResult<Option<&str>> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| Self::mismatch(name, "string", value)),
        }
    }

    /// The internal node id of a row projected from a vertex.
    pub fn node_id(&self) -> RepoResult<Uuid> {
        self.get_uuid("id")
    }
}

/// An ordered set of result rows with empty-result detection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RowSet {
    rows: Vec<Row>,
}

impl RowSet {
    pub fn new(rows: Vec<Row>) -> Self {
        RowSet { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// The single row of a lookup that must match, `NotFound` otherwise.
    pub fn single(self, what: impl Into<String>) -> RepoResult<Row> {
        self.rows
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(what.into()))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl IntoIterator for RowSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
