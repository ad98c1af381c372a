// models/src/edges.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identifiers::Identifier;

/// A directed, typed edge connecting two vertices.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Auto-generated unique id for the edge.
    pub id: Uuid,

    /// Source vertex.
    pub outbound_id: Uuid,

    /// Edge type (e.g., "FOR_PATIENT", "HAS_DIAGNOSIS").
    pub edge_type: Identifier,

    /// Target vertex.
    pub inbound_id: Uuid,
}

impl Edge {
    /// Create a new edge with an auto-generated `id`.
    pub fn new(outbound_id: Uuid, edge_type: Identifier, inbound_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            outbound_id,
            edge_type,
            inbound_id,
        }
    }
}
