//! Error types for bakeweb-dom

use thiserror::Error;

use crate::NodeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("Unknown node: {id}")]
    UnknownNode { id: NodeId },

    #[error("Node {id} is not an element")]
    NotAnElement { id: NodeId },

    #[error("Cannot insert node {child} under {parent}: it would become its own ancestor")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}

/// Result type with DomError
pub type DomResult<T> = Result<T, DomError>;
