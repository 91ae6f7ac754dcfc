use thiserror::Error;

use crate::tui::document::NodeId;

/// Errors raised by document tree operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("Node {0:?} does not belong to this document")]
    NodeNotFound(NodeId),

    #[error("Cannot insert {child:?} under {parent:?}: {reason}")]
    HierarchyRequest {
        parent: NodeId,
        child: NodeId,
        reason: &'static str,
    },

    #[error("Node {0:?} already hosts a shadow root")]
    ShadowRootExists(NodeId),

    #[error("Node {0:?} is not a shadow root")]
    NotAShadowRoot(NodeId),

    #[error("Invalid custom element name '{0}'")]
    InvalidCustomElementName(String),

    #[error("Custom element '{0}' is already defined")]
    AlreadyDefined(String),
}

/// Result type for document operations
pub type DomResult<T> = Result<T, DomError>;
