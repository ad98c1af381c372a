// lib/src/engine/graph.rs

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use models::edges::Edge;
use models::identifiers::Identifier;
use models::vertices::Vertex;

/// In-memory property graph with adjacency indexes. The adjacency lists
/// keep edge-insertion order, so traversals yield neighbors in the order
/// their edges were created.
#[derive(Debug, Default)]
pub struct Graph {
    pub vertices: HashMap<Uuid, Vertex>,
    pub edges: HashMap<Uuid, Edge>,

    // For fast traversal (adjacency lists, insertion-ordered)
    pub adjacency_list: HashMap<Uuid, Vec<Uuid>>, // from vertex id -> edge ids
    pub inbound_list: HashMap<Uuid, Vec<Uuid>>,   // to vertex id -> edge ids
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    pub fn add_vertex(&mut self, vertex: Vertex) {
        self.vertices.insert(vertex.id, vertex);
    }

    pub fn add_edge(&mut self, edge: Edge) {
        let from = edge.outbound_id;
        let to = edge.inbound_id;
        let edge_id = edge.id;

        self.edges.insert(edge_id, edge);
        self.adjacency_list.entry(from).or_default().push(edge_id);
        self.inbound_list.entry(to).or_default().push(edge_id);
    }

    pub fn get_vertex(&self, id: &Uuid) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    pub fn get_vertex_mut(&mut self, id: &Uuid) -> Option<&mut Vertex> {
        self.vertices.get_mut(id)
    }

    pub fn contains_vertex(&self, id: &Uuid) -> bool {
        self.vertices.contains_key(id)
    }

    /// All vertices carrying the label.
    pub fn vertices_with_label<'a>(
        &'a self,
        label: &'a Identifier,
    ) -> impl Iterator<Item = &'a Vertex> + 'a {
        self.vertices.values().filter(move |v| &v.label == label)
    }

    /// Outgoing edges of a vertex, optionally restricted to one type.
    pub fn out_edges<'a>(
        &'a self,
        from: &Uuid,
        edge_type: Option<&'a Identifier>,
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        self.adjacency_list
            .get(from)
            .into_iter()
            .flatten()
            .filter_map(|edge_id| self.edges.get(edge_id))
            .filter(move |edge| edge_type.map_or(true, |t| &edge.edge_type == t))
    }

    /// Incoming edges of a vertex, optionally restricted to one type.
    pub fn in_edges<'a>(
        &'a self,
        to: &Uuid,
        edge_type: Option<&'a Identifier>,
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        self.inbound_list
            .get(to)
            .into_iter()
            .flatten()
            .filter_map(|edge_id| self.edges.get(edge_id))
            .filter(move |edge| edge_type.map_or(true, |t| &edge.edge_type == t))
    }

    /// Removes one edge and its adjacency index entries.
    pub fn remove_edge(&mut self, edge_id: &Uuid) {
        if let Some(edge) = self.edges.remove(edge_id) {
            if let Some(out) = self.adjacency_list.get_mut(&edge.outbound_id) {
                out.retain(|id| id != edge_id);
            }
            if let Some(inb) = self.inbound_list.get_mut(&edge.inbound_id) {
                inb.retain(|id| id != edge_id);
            }
        }
    }

    /// Removes a vertex together with every incident edge, so no dangling
    /// edge survives.
    pub fn remove_vertex(&mut self, id: &Uuid) {
        let mut incident: HashSet<Uuid> = HashSet::new();
        if let Some(out) = self.adjacency_list.get(id) {
            incident.extend(out.iter().copied());
        }
        if let Some(inb) = self.inbound_list.get(id) {
            incident.extend(inb.iter().copied());
        }
        for edge_id in incident {
            self.remove_edge(&edge_id);
        }
        self.adjacency_list.remove(id);
        self.inbound_list.remove(id);
        self.vertices.remove(id);
    }
}
