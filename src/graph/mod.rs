//! The mutable node/link graph the editor builds.
//!
//! The graph owns its nodes and links and hands out copyable handles
//! ([`NodeId`], [`LinkId`]). Predecessor order is the order in which links were
//! committed, not the order of the target port indices, so a call generated for
//! a two-input node lists its arguments in the order the user wired them.

use crate::error::{GraphError, PortFault};
use ahash::AHashMap;
use tracing::debug;

pub mod document;
mod link;
mod node;

pub use document::{GraphDocument, IntoGraph};
pub use link::*;
pub use node::*;

#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: AHashMap<NodeId, Node>,
    node_order: Vec<NodeId>,
    names: AHashMap<String, NodeId>,
    links: AHashMap<LinkId, Link>,
    input_nodes: Vec<NodeId>,
    output_nodes: Vec<NodeId>,
    type_counter: AHashMap<String, usize>,
    next_node_id: u32,
    next_link_id: u32,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node with an explicit variable name at the origin.
    pub fn create_node(
        &mut self,
        node_type: &str,
        var_name: &str,
        n_in: u32,
        n_out: u32,
    ) -> Result<NodeId, GraphError> {
        self.create_node_at(node_type, var_name, n_in, n_out, Position::default())
    }

    /// Creates a node with an explicit variable name and editor position.
    pub fn create_node_at(
        &mut self,
        node_type: &str,
        var_name: &str,
        n_in: u32,
        n_out: u32,
        position: Position,
    ) -> Result<NodeId, GraphError> {
        if var_name.is_empty() {
            return Err(GraphError::EmptyVarName);
        }
        if self.names.contains_key(var_name) {
            return Err(GraphError::DuplicateVarName(var_name.to_string()));
        }
        Ok(self.insert_node(node_type, var_name.to_string(), n_in, n_out, position))
    }

    /// Creates a node named after its type, e.g. the first `Conv2d` becomes
    /// `conv2d_1`, the second `conv2d_2`.
    pub fn add_node(&mut self, node_type: &str, n_in: u32, n_out: u32) -> NodeId {
        let var_name = self.next_var_name(node_type);
        self.insert_node(node_type, var_name, n_in, n_out, Position::default())
    }

    fn insert_node(
        &mut self,
        node_type: &str,
        var_name: String,
        n_in: u32,
        n_out: u32,
        position: Position,
    ) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;

        let node = Node {
            id,
            var_name: var_name.clone(),
            node_type: node_type.to_string(),
            position,
            n_in,
            n_out,
            in_links: Vec::new(),
            out_links: Vec::new(),
        };

        if node.is_input() {
            self.input_nodes.push(id);
        } else if node.is_output() {
            self.output_nodes.push(id);
        }

        debug!(node = %var_name, node_type, n_in, n_out, "created node");
        self.names.insert(var_name, id);
        self.nodes.insert(id, node);
        self.node_order.push(id);
        id
    }

    fn next_var_name(&mut self, node_type: &str) -> String {
        let base = lower_first(node_type);
        let count = self.type_counter.entry(node_type.to_string()).or_insert(0);
        loop {
            *count += 1;
            let candidate = format!("{}_{}", base, count);
            if !self.names.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Commits a link from `source`'s output port to `target`'s input port.
    ///
    /// On success `source` becomes the last entry of `target`'s predecessor list.
    pub fn connect(
        &mut self,
        source: NodeId,
        source_port: u32,
        target: NodeId,
        target_port: u32,
    ) -> Result<LinkId, GraphError> {
        let source_node = self.require(source)?;
        let target_node = self.require(target)?;
        if source == target {
            return Err(GraphError::SelfLink(source_node.var_name.clone()));
        }
        // Output values are returned, never bound, so nothing may read them.
        if source_node.is_output() {
            return Err(GraphError::LinkFromOutput(source_node.var_name.clone()));
        }
        self.check_port(source_node, PortDirection::Output, source_port)?;
        self.check_port(target_node, PortDirection::Input, target_port)?;

        let id = LinkId(self.next_link_id);
        self.next_link_id += 1;
        let link = Link {
            id,
            source: Port {
                node: source,
                index: source_port,
            },
            target: Port {
                node: target,
                index: target_port,
            },
        };
        self.links.insert(id, link);

        if let Some(node) = self.nodes.get_mut(&source) {
            node.out_links.push(id);
        }
        if let Some(node) = self.nodes.get_mut(&target) {
            node.in_links.push(id);
        }

        debug!(
            link = %id,
            source = %source,
            source_port,
            target = %target,
            target_port,
            "committed link"
        );
        Ok(id)
    }

    fn check_port(
        &self,
        node: &Node,
        direction: PortDirection,
        port: u32,
    ) -> Result<(), GraphError> {
        let (declared, links) = match direction {
            PortDirection::Input => (node.n_in, &node.in_links),
            PortDirection::Output => (node.n_out, &node.out_links),
        };

        let fault = if port >= declared {
            Some(PortFault::OutOfRange { declared })
        } else if links
            .iter()
            .filter_map(|id| self.links.get(id))
            .any(|link| link.endpoint(direction).index == port)
        {
            Some(PortFault::Occupied)
        } else {
            None
        };

        match fault {
            Some(fault) => Err(GraphError::InvalidPort {
                node: node.var_name.clone(),
                direction,
                port,
                fault,
            }),
            None => Ok(()),
        }
    }

    /// Removes one link and the predecessor entry it produced.
    pub fn remove_link(&mut self, id: LinkId) -> Result<Link, GraphError> {
        let link = self.links.remove(&id).ok_or(GraphError::LinkNotFound(id))?;
        if let Some(node) = self.nodes.get_mut(&link.source.node) {
            node.out_links.retain(|l| *l != id);
        }
        if let Some(node) = self.nodes.get_mut(&link.target.node) {
            node.in_links.retain(|l| *l != id);
        }
        debug!(link = %id, "removed link");
        Ok(link)
    }

    /// Removes a node together with every link touching it.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Node, GraphError> {
        let node = self.require(id)?;
        let attached: Vec<LinkId> = node
            .in_links
            .iter()
            .chain(node.out_links.iter())
            .copied()
            .collect();
        for link in attached {
            self.remove_link(link)?;
        }

        let node = self.nodes.remove(&id).ok_or(GraphError::NodeNotFound(id))?;
        self.names.remove(&node.var_name);
        self.node_order.retain(|n| *n != id);
        self.input_nodes.retain(|n| *n != id);
        self.output_nodes.retain(|n| *n != id);
        debug!(node = %node.var_name, "removed node");
        Ok(node)
    }

    pub fn move_node(&mut self, id: NodeId, position: Position) -> Result<(), GraphError> {
        let node = self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))?;
        node.position = position;
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub(crate) fn require(&self, id: NodeId) -> Result<&Node, GraphError> {
        self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))
    }

    pub fn node_by_name(&self, var_name: &str) -> Option<&Node> {
        self.names.get(var_name).and_then(|id| self.nodes.get(id))
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.node_order.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(&id)
    }

    /// Links in commit order.
    pub fn links(&self) -> Vec<&Link> {
        let mut links: Vec<&Link> = self.links.values().collect();
        links.sort_by_key(|link| link.id);
        links
    }

    /// The link attached to a specific port, if any.
    pub fn link_on(&self, node: NodeId, direction: PortDirection, port: u32) -> Option<&Link> {
        let node = self.nodes.get(&node)?;
        let links = match direction {
            PortDirection::Input => &node.in_links,
            PortDirection::Output => &node.out_links,
        };
        links
            .iter()
            .filter_map(|id| self.links.get(id))
            .find(|link| link.endpoint(direction).index == port)
    }

    /// Predecessors of `id` in link-commit order. A source wired into two
    /// input ports appears twice.
    pub fn predecessors_in_order(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        let node = self.require(id)?;
        Ok(node
            .in_links
            .iter()
            .filter_map(|link| self.links.get(link))
            .map(|link| link.source.node)
            .collect())
    }

    /// Successors of `id` in link-commit order.
    pub fn successors(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        let node = self.require(id)?;
        Ok(node
            .out_links
            .iter()
            .filter_map(|link| self.links.get(link))
            .map(|link| link.target.node)
            .collect())
    }

    /// Nodes tagged `Input`, in creation order.
    pub fn input_nodes(&self) -> &[NodeId] {
        &self.input_nodes
    }

    /// Nodes tagged `Output`, in creation order.
    pub fn output_nodes(&self) -> &[NodeId] {
        &self.output_nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
