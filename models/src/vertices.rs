// models/src/vertices.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{identifiers::Identifier, properties::PropertyValue};

/// A vertex: a labeled node with named properties.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// The internal id of the vertex.
    pub id: Uuid,

    /// The label of the vertex (e.g., "Patient", "Appointment").
    pub label: Identifier,

    /// The properties of the vertex.
    pub properties: HashMap<String, PropertyValue>,
}

impl Vertex {
    /// Creates a new vertex with a fresh id.
    pub fn new(label: Identifier) -> Self {
        Vertex {
            id: Uuid::new_v4(),
            label,
            properties: HashMap::new(),
        }
    }

    /// Creates a new vertex with a specified id.
    pub fn new_with_id(id: Uuid, label: Identifier) -> Self {
        Vertex {
            id,
            label,
            properties: HashMap::new(),
        }
    }

    pub fn label(&self) -> &Identifier {
        &self.label
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    /// Adds or replaces a property on the vertex.
    pub fn add_property(&mut self, key: &str, value: impl Into<PropertyValue>) {
        self.properties.insert(key.to_string(), value.into());
    }

    /// Builder-style variant of [`add_property`](Self::add_property).
    pub fn with_property(mut self, key: &str, value: impl Into<PropertyValue>) -> Self {
        self.add_property(key, value);
        self
    }

    /// Gets a property value by key.
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Gets a string property by key, `None` if absent or not a string.
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(|v| v.as_str())
    }
}
