use thiserror::Error;

use crate::model::NodeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Duplicate {kind} id: {id}")]
    DuplicateEntity { kind: &'static str, id: String },

    #[error("Unable to find {kind} with id: {id}")]
    NotFound { kind: &'static str, id: String },

    // Fields are `from`/`to` rather than `source`/`target`: thiserror reserves `source`.
    #[error("Cannot create edge between non-existent nodes in strict mode: {from} -> {to}")]
    InvalidReference { from: NodeId, to: NodeId },

    #[error("Index inconsistency: {0}")]
    Inconsistent(String),
}

impl GraphError {
    pub(crate) fn duplicate(kind: &'static str, id: impl ToString) -> Self {
        Self::DuplicateEntity {
            kind,
            id: id.to_string(),
        }
    }

    pub(crate) fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_id() {
        let err = GraphError::not_found("node", "n-42");
        assert_eq!(err.to_string(), "Unable to find node with id: n-42");
    }

    #[test]
    fn test_invalid_reference_message() {
        let err = GraphError::InvalidReference {
            from: NodeId::from("a"),
            to: NodeId::from("b"),
        };
        assert_eq!(
            err.to_string(),
            "Cannot create edge between non-existent nodes in strict mode: a -> b"
        );
    }
}
