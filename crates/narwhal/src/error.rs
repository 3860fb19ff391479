pub type Result<T> = std::result::Result<T, Error>;

/// Input-contract violations surfaced while building a [`crate::HierarchyGraph`].
///
/// The upstream validator is expected to reject all of these before a graph
/// reaches this crate; hitting one here means the contract was broken, and the
/// build fails fast rather than producing a layout that silently violates
/// subtree contiguity. The solver itself never fails on a constructed graph.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid graph document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("duplicate node id: {id}")]
    DuplicateNode { id: String },

    #[error("node {id} references missing parent {parent}")]
    MissingParent { id: String, parent: String },

    #[error("hierarchy is not a forest: {id} sits on a parent cycle")]
    CyclicHierarchy { id: String },

    #[error("edge ({from}, {target}) references an undeclared node")]
    UnknownEndpoint { from: String, target: String },
}
