use super::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle to a link. Ids grow monotonically, so sorting by id gives
/// commit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkId(pub(super) u32);

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Which side of a node a port sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    Input,
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => write!(f, "Input"),
            PortDirection::Output => write!(f, "Output"),
        }
    }
}

/// One endpoint of a link: a node plus a port index on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Port {
    pub node: NodeId,
    pub index: u32,
}

/// A directed connection from an output port to an input port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub(super) id: LinkId,
    pub(super) source: Port,
    pub(super) target: Port,
}

impl Link {
    pub fn id(&self) -> LinkId {
        self.id
    }

    pub fn source(&self) -> Port {
        self.source
    }

    pub fn target(&self) -> Port {
        self.target
    }

    /// The endpoint sitting on the given side: the source for `Output`,
    /// the target for `Input`.
    pub fn endpoint(&self, direction: PortDirection) -> Port {
        match direction {
            PortDirection::Output => self.source,
            PortDirection::Input => self.target,
        }
    }
}
