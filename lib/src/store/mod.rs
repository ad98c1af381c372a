// lib/src/store/mod.rs
//! The graph store seam consumed by every repository.
//!
//! A [`GraphStore`] hands out one [`GraphSession`] per repository
//! operation. The session spans the whole operation and is released on
//! every exit path; implementations make it an exclusive transaction
//! boundary so a check-then-write sequence (overlap check before an
//! appointment insert, author check before a note mutation) cannot
//! interleave with another caller's writes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use models::errors::RepoResult;
use models::identifiers::Identifier;
use models::properties::PropertyValue;
use models::rows::{Row, RowSet};
use models::vertices::Vertex;

/// A parametrized predicate applied to candidate nodes.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    /// Property equals the value. Missing property never matches.
    PropEq(String, PropertyValue),
    /// String property equals the value ignoring case.
    PropEqIgnoreCase(String, String),
    /// Property differs from the value (or is absent).
    PropNe(String, PropertyValue),
    /// Timestamp property is strictly before the instant.
    TimestampLt(String, DateTime<Utc>),
    /// Timestamp property is strictly after the instant.
    TimestampGt(String, DateTime<Utc>),
}

impl Filter {
    pub fn matches(&self, vertex: &Vertex) -> bool {
        match self {
            Filter::PropEq(key, value) => vertex.get_property(key) == Some(value),
            Filter::PropEqIgnoreCase(key, value) => vertex
                .property_str(key)
                .is_some_and(|s| crate::util::eq_ignore_case(s, value)),
            Filter::PropNe(key, value) => vertex.get_property(key) != Some(value),
            Filter::TimestampLt(key, instant) => vertex
                .get_property(key)
                .and_then(PropertyValue::as_timestamp)
                .is_some_and(|ts| ts < *instant),
            Filter::TimestampGt(key, instant) => vertex
                .get_property(key)
                .and_then(PropertyValue::as_timestamp)
                .is_some_and(|ts| ts > *instant),
        }
    }
}

/// One logical session against the graph store.
///
/// Reads return [`RowSet`]s of named fields (`id` plus node properties)
/// with typed accessors; mutations are primitive parametrized operations.
/// Partial updates go through [`set_properties`](Self::set_properties)
/// with only the supplied fields, never assembled query text.
#[async_trait]
pub trait GraphSession: Send {
    /// All nodes with the label matching every filter.
    async fn match_nodes(&mut self, label: &Identifier, filters: &[Filter]) -> RepoResult<RowSet>;

    /// Nodes reached by following `edge_type` out of `from`, filtered.
    async fn out_neighbors(
        &mut self,
        from: Uuid,
        edge_type: &Identifier,
        filters: &[Filter],
    ) -> RepoResult<RowSet>;

    /// Nodes with an `edge_type` edge pointing at `to`, filtered.
    async fn in_neighbors(
        &mut self,
        to: Uuid,
        edge_type: &Identifier,
        filters: &[Filter],
    ) -> RepoResult<RowSet>;

    /// Inserts the vertex and returns its node id.
    async fn create_node(&mut self, vertex: Vertex) -> RepoResult<Uuid>;

    /// Creates a typed edge between two existing nodes.
    async fn create_edge(&mut self, from: Uuid, edge_type: &Identifier, to: Uuid)
        -> RepoResult<()>;

    /// Sets each supplied property on the node, leaving others untouched.
    async fn set_properties(
        &mut self,
        id: Uuid,
        props: Vec<(String, PropertyValue)>,
    ) -> RepoResult<()>;

    /// Removes every outgoing edge of the listed types from the node.
    async fn delete_out_edges(&mut self, from: Uuid, edge_types: &[&Identifier])
        -> RepoResult<()>;

    /// Deletes the nodes and all their incident edges. Ids already gone
    /// are skipped, so a cascade pass is safe to list a node twice.
    async fn detach_delete(&mut self, ids: &[Uuid]) -> RepoResult<()>;

    /// Single node with `key = value` under the label, if any.
    async fn find_by_key(
        &mut self,
        label: &Identifier,
        key: &str,
        value: &str,
    ) -> RepoResult<Option<Row>> {
        let rows = self
            .match_nodes(label, &[Filter::PropEq(key.to_string(), value.into())])
            .await?;
        Ok(rows.into_iter().next())
    }
}

/// Handle to the backing graph database. Owned externally and shared by
/// all repositories; safe for concurrent use because every operation runs
/// inside its own session.
#[async_trait]
pub trait GraphStore: Send + Sync {
    async fn session(&self) -> RepoResult<Box<dyn GraphSession>>;
}

#[cfg(test)]
mod tests {
    use super::Filter;
    use chrono::{TimeZone, Utc};
    use models::identifiers::Identifier;
    use models::vertices::Vertex;

    #[test]
    fn should_match_filters_against_vertex() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let vertex = Vertex::new(Identifier::new("Appointment").unwrap())
            .with_property("appointmentID", "AP01")
            .with_property("starts", ts);

        assert!(Filter::PropEq("appointmentID".into(), "AP01".into()).matches(&vertex));
        assert!(!Filter::PropEq("appointmentID".into(), "AP02".into()).matches(&vertex));
        assert!(Filter::PropEqIgnoreCase("appointmentID".into(), "ap01".into()).matches(&vertex));
        assert!(Filter::PropNe("appointmentID".into(), "AP02".into()).matches(&vertex));
        assert!(Filter::TimestampLt(
            "starts".into(),
            Utc.with_ymd_and_hms(2024, 3, 1, 11, 0, 0).unwrap()
        )
        .matches(&vertex));
        assert!(!Filter::TimestampGt(
            "starts".into(),
            Utc.with_ymd_and_hms(2024, 3, 1, 11, 0, 0).unwrap()
        )
        .matches(&vertex));
        // Missing property never satisfies an equality or range filter.
        assert!(!Filter::PropEq("reason".into(), "checkup".into()).matches(&vertex));
    }
}
