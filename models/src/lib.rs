// models/src/lib.rs

pub mod clinical;
pub mod edges;
pub mod errors;
pub mod identifiers;
pub mod properties;
pub mod rows;
pub mod schema;
pub mod to_vertex;
pub mod vertices;

// Re-export common core types for convenience when other crates use `models::*`.
pub use edges::Edge;
pub use errors::{RepoError, RepoResult};
pub use identifiers::Identifier;
pub use properties::PropertyValue;
pub use rows::{Row, RowSet};
pub use to_vertex::ToVertex;
pub use vertices::Vertex;
