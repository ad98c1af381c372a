// lib/src/memory/mod.rs
//! In-memory [`GraphStore`] backed by [`Graph`].
//!
//! A session holds the graph's write lock for its whole lifetime, so each
//! repository operation runs as one exclusive transaction and no other
//! caller can write between a check and the write it guards.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};
use tracing::debug;
use uuid::Uuid;

use models::errors::{RepoError, RepoResult};
use models::identifiers::Identifier;
use models::properties::PropertyValue;
use models::rows::{Row, RowSet};
use models::vertices::Vertex;

use crate::engine::Graph;
use crate::store::{Filter, GraphSession, GraphStore};

#[derive(Clone, Default)]
pub struct MemoryGraphStore {
    graph: Arc<RwLock<Graph>>,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        MemoryGraphStore::default()
    }
}

#[async_trait]
impl GraphStore for MemoryGraphStore {
    async fn session(&self) -> RepoResult<Box<dyn GraphSession>> {
        let guard = Arc::clone(&self.graph).write_owned().await;
        Ok(Box::new(MemorySession { graph: guard }))
    }
}

struct MemorySession {
    graph: OwnedRwLockWriteGuard<Graph>,
}

impl MemorySession {
    fn collect(vertices: impl Iterator<Item = Vertex>, filters: &[Filter]) -> RowSet {
        let rows: Vec<Row> = vertices
            .filter(|v| filters.iter().all(|f| f.matches(v)))
            .map(|v| Row::from_vertex(&v))
            .collect();
        RowSet::new(rows)
    }

    fn require_vertex(&self, id: &Uuid) -> RepoResult<()> {
        if self.graph.contains_vertex(id) {
            Ok(())
        } else {
            Err(RepoError::Store(format!("no node with id {id}")))
        }
    }
}

#[async_trait]
impl GraphSession for MemorySession {
    async fn match_nodes(&mut self, label: &Identifier, filters: &[Filter]) -> RepoResult<RowSet> {
        let vertices: Vec<Vertex> = self.graph.vertices_with_label(label).cloned().collect();
        Ok(Self::collect(vertices.into_iter(), filters))
    }

    async fn out_neighbors(
        &mut self,
        from: Uuid,
        edge_type: &Identifier,
        filters: &[Filter],
    ) -> RepoResult<RowSet> {
        let neighbors: Vec<Vertex> = self
            .graph
            .out_edges(&from, Some(edge_type))
            .filter_map(|edge| self.graph.get_vertex(&edge.inbound_id))
            .cloned()
            .collect();
        Ok(Self::collect(neighbors.into_iter(), filters))
    }

    async fn in_neighbors(
        &mut self,
        to: Uuid,
        edge_type: &Identifier,
        filters: &[Filter],
    ) -> RepoResult<RowSet> {
        let neighbors: Vec<Vertex> = self
            .graph
            .in_edges(&to, Some(edge_type))
            .filter_map(|edge| self.graph.get_vertex(&edge.outbound_id))
            .cloned()
            .collect();
        Ok(Self::collect(neighbors.into_iter(), filters))
    }

    async fn create_node(&mut self, vertex: Vertex) -> RepoResult<Uuid> {
        let id = vertex.id;
        debug!(label = %vertex.label, %id, "Creating node");
        self.graph.add_vertex(vertex);
        Ok(id)
    }

    async fn create_edge(
        &mut self,
        from: Uuid,
        edge_type: &Identifier,
        to: Uuid,
    ) -> RepoResult<()> {
        self.require_vertex(&from)?;
        self.require_vertex(&to)?;
        self.graph
            .add_edge(models::edges::Edge::new(from, edge_type.clone(), to));
        Ok(())
    }

    async fn set_properties(
        &mut self,
        id: Uuid,
        props: Vec<(String, PropertyValue)>,
    ) -> RepoResult<()> {
        let vertex = self
            .graph
            .get_vertex_mut(&id)
            .ok_or_else(|| RepoError::Store(format!("no node with id {id}")))?;
        for (key, value) in props {
            vertex.properties.insert(key, value);
        }
        Ok(())
    }

    async fn delete_out_edges(
        &mut self,
        from: Uuid,
        edge_types: &[&Identifier],
    ) -> RepoResult<()> {
        let doomed: Vec<Uuid> = self
            .graph
            .out_edges(&from, None)
            .filter(|edge| edge_types.iter().any(|t| &&edge.edge_type == t))
            .map(|edge| edge.id)
            .collect();
        for edge_id in doomed {
            self.graph.remove_edge(&edge_id);
        }
        Ok(())
    }

    async fn detach_delete(&mut self, ids: &[Uuid]) -> RepoResult<()> {
        for id in ids {
            // Already-removed ids are fine; cascades may repeat a node.
            self.graph.remove_vertex(id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::schema;

    #[tokio::test]
    async fn should_create_and_match_nodes() {
        let store = MemoryGraphStore::new();
        let mut session = store.session().await.unwrap();

        let vertex = Vertex::new(schema::PATIENT.clone())
            .with_property("patientPN", "PN01")
            .with_property("firstName", "Sara");
        session.create_node(vertex).await.unwrap();

        let rows = session
            .match_nodes(
                &schema::PATIENT,
                &[Filter::PropEq("patientPN".into(), "PN01".into())],
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.first().unwrap().get_str("firstName").unwrap(), "Sara");
    }

    #[tokio::test]
    async fn should_traverse_edges_in_both_directions() {
        let store = MemoryGraphStore::new();
        let mut session = store.session().await.unwrap();

        let patient = session
            .create_node(Vertex::new(schema::PATIENT.clone()).with_property("patientPN", "PN01"))
            .await
            .unwrap();
        let doctor = session
            .create_node(Vertex::new(schema::DOCTOR.clone()).with_property("doctorID", "DR01"))
            .await
            .unwrap();
        session
            .create_edge(patient, &schema::HAS_PRIMARY_DOCTOR, doctor)
            .await
            .unwrap();

        let out = session
            .out_neighbors(patient, &schema::HAS_PRIMARY_DOCTOR, &[])
            .await
            .unwrap();
        assert_eq!(out.single("doctor").unwrap().get_str("doctorID").unwrap(), "DR01");

        let inbound = session
            .in_neighbors(doctor, &schema::HAS_PRIMARY_DOCTOR, &[])
            .await
            .unwrap();
        assert_eq!(
            inbound.single("patient").unwrap().get_str("patientPN").unwrap(),
            "PN01"
        );
    }

    #[tokio::test]
    async fn should_update_only_supplied_properties() {
        let store = MemoryGraphStore::new();
        let mut session = store.session().await.unwrap();

        let id = session
            .create_node(
                Vertex::new(schema::PATIENT.clone())
                    .with_property("patientPN", "PN01")
                    .with_property("firstName", "Sara")
                    .with_property("lastName", "Svensson"),
            )
            .await
            .unwrap();
        session
            .set_properties(id, vec![("firstName".into(), "Maja".into())])
            .await
            .unwrap();

        let row = session
            .find_by_key(&schema::PATIENT, "patientPN", "PN01")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.get_str("firstName").unwrap(), "Maja");
        assert_eq!(row.get_str("lastName").unwrap(), "Svensson");
    }

    #[tokio::test]
    async fn should_detach_delete_and_tolerate_repeats() {
        let store = MemoryGraphStore::new();
        let mut session = store.session().await.unwrap();

        let patient = session
            .create_node(Vertex::new(schema::PATIENT.clone()).with_property("patientPN", "PN01"))
            .await
            .unwrap();
        let doctor = session
            .create_node(Vertex::new(schema::DOCTOR.clone()).with_property("doctorID", "DR01"))
            .await
            .unwrap();
        session
            .create_edge(patient, &schema::HAS_PRIMARY_DOCTOR, doctor)
            .await
            .unwrap();

        session.detach_delete(&[patient, patient]).await.unwrap();

        let rows = session.match_nodes(&schema::PATIENT, &[]).await.unwrap();
        assert!(rows.is_empty());
        let inbound = session
            .in_neighbors(doctor, &schema::HAS_PRIMARY_DOCTOR, &[])
            .await
            .unwrap();
        assert!(inbound.is_empty());
    }
}
