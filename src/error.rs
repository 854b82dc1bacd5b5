use crate::graph::{LinkId, NodeId, PortDirection};
use std::fmt;
use thiserror::Error;

/// Why a port could not take a new link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortFault {
    /// The index is not below the node's declared port count.
    OutOfRange { declared: u32 },
    /// Another link already uses the port.
    Occupied,
}

impl fmt::Display for PortFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortFault::OutOfRange { declared } => {
                write!(f, "out of range (node declares {} ports)", declared)
            }
            PortFault::Occupied => write!(f, "already occupied"),
        }
    }
}

/// Errors raised while mutating the node/link graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("{direction} port {port} on node '{node}' is {fault}")]
    InvalidPort {
        node: String,
        direction: PortDirection,
        port: u32,
        fault: PortFault,
    },

    #[error("Node {0} does not exist in the graph")]
    NodeNotFound(NodeId),

    #[error("Link {0} does not exist in the graph")]
    LinkNotFound(LinkId),

    #[error("A node named '{0}' already exists")]
    DuplicateVarName(String),

    #[error("Node variable names must not be empty")]
    EmptyVarName,

    #[error("Node '{0}' cannot be linked to itself")]
    SelfLink(String),

    #[error("Output node '{0}' ends the graph and cannot feed another node")]
    LinkFromOutput(String),
}

/// Errors raised while constructing AST nodes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    #[error("Method '{method}' declares parameter '{name}' more than once")]
    DuplicateParameter { method: String, name: String },

    #[error("A {kind} must have a non-empty name")]
    EmptyName { kind: &'static str },
}

/// Errors raised during a generation pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    #[error("Node '{node}' has type '{type_name}', which belongs to no known category")]
    UnclassifiedNodeType { node: String, type_name: String },

    #[error("Node '{node}' depends on itself; the graph contains a cycle")]
    CyclicGraph { node: String },

    #[error("Node {0} does not exist in the graph")]
    NodeNotFound(NodeId),

    #[error("Output node '{node}' has no incoming link")]
    DisconnectedOutput { node: String },

    #[error(transparent)]
    Ast(#[from] AstError),
}

/// Errors raised when loading a graph document.
#[derive(Error, Debug, Clone)]
pub enum DocumentError {
    #[error("Failed to parse graph JSON: {0}")]
    Json(String),

    #[error("Link refers to node '{var_name}', which is not in the document")]
    UnknownNode { var_name: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}
