// models/src/clinical/attachment.rs

use serde::{Deserialize, Serialize};

use crate::errors::RepoResult;
use crate::rows::Row;
use crate::{schema, ToVertex, Vertex};

/// A file attached to a note. The blob itself lives in the external
/// document store; the graph records only title and content type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub attachment_id: String,
    pub title: String,
    pub kind: String,
}

impl Attachment {
    pub fn from_row(row: &Row) -> RepoResult<Self> {
        Ok(Attachment {
            attachment_id: row.get_str("attachmentID")?.to_string(),
            title: row.get_str("title")?.to_string(),
            kind: row.get_str("type")?.to_string(),
        })
    }
}

impl ToVertex for Attachment {
    fn to_vertex(&self) -> Vertex {
        Vertex::new(schema::ATTACHMENT.clone())
            .with_property("attachmentID", self.attachment_id.as_str())
            .with_property("title", self.title.as_str())
            .with_property("type", self.kind.as_str())
    }
}
