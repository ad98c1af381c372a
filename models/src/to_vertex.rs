// models/src/to_vertex.rs

use crate::vertices::Vertex;

/// Conversion from a domain entity into its graph vertex representation.
pub trait ToVertex {
    fn to_vertex(&self) -> Vertex;
}
