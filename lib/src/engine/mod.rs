// lib/src/engine/mod.rs

pub mod graph;

// Public re-exports
pub use graph::Graph;
