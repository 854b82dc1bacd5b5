use super::LinkId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag of the node that feeds data into the generated forward method.
pub const INPUT_TYPE: &str = "Input";
/// Type tag of the node whose value the generated forward method returns.
pub const OUTPUT_TYPE: &str = "Output";

/// Stable handle to a node. Handles are never reused within one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(super) u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the editor placed the node. The generator never looks at it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A typed unit in the visual graph, one computation step.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(super) id: NodeId,
    pub(super) var_name: String,
    pub(super) node_type: String,
    pub(super) position: Position,
    pub(super) n_in: u32,
    pub(super) n_out: u32,
    /// Incoming links in commit order.
    pub(super) in_links: Vec<LinkId>,
    /// Outgoing links in commit order.
    pub(super) out_links: Vec<LinkId>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn var_name(&self) -> &str {
        &self.var_name
    }

    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Number of input ports.
    pub fn n_in(&self) -> u32 {
        self.n_in
    }

    /// Number of output ports.
    pub fn n_out(&self) -> u32 {
        self.n_out
    }

    pub fn in_links(&self) -> &[LinkId] {
        &self.in_links
    }

    pub fn out_links(&self) -> &[LinkId] {
        &self.out_links
    }

    pub fn is_input(&self) -> bool {
        self.node_type == INPUT_TYPE
    }

    pub fn is_output(&self) -> bool {
        self.node_type == OUTPUT_TYPE
    }

    pub fn is_boundary(&self) -> bool {
        self.is_input() || self.is_output()
    }

    /// The name the generated code binds this node's value to.
    ///
    /// Boundary nodes keep their own name so that forward parameters and return
    /// values read naturally; every other node gets an `_out` suffix.
    pub fn out_var_name(&self) -> String {
        if self.is_boundary() {
            self.var_name.clone()
        } else {
            format!("{}_out", self.var_name)
        }
    }
}
