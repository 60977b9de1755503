use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Separator between source and target in a derived edge id.
pub const EDGE_ID_SEPARATOR: &str = ":::";

/// Identifier of a node. Unique within a graph, never reassigned.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Fresh UUID v4 hex id (no dashes). The graph never calls this itself.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().as_simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&NodeId> for NodeId {
    fn from(id: &NodeId) -> Self {
        id.clone()
    }
}

/// Identifier of an edge, derived from its endpoints as `source:::target`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub String);

impl EdgeId {
    pub fn between(source: &NodeId, target: &NodeId) -> Self {
        Self(format!("{}{EDGE_ID_SEPARATOR}{}", source.0, target.0))
    }

    /// Split a derived id back into `(source, target)`.
    ///
    /// Splits on the first separator, so node ids containing `:::` do not
    /// round-trip.
    pub fn endpoints(&self) -> Option<(NodeId, NodeId)> {
        self.0
            .split_once(EDGE_ID_SEPARATOR)
            .map(|(s, t)| (NodeId::from(s), NodeId::from(t)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EdgeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EdgeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&EdgeId> for EdgeId {
    fn from(id: &EdgeId) -> Self {
        id.clone()
    }
}
