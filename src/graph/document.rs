use super::{Graph, Position};
use crate::error::DocumentError;
use serde::{Deserialize, Serialize};

/// The saved form of an editor session: nodes with their layout, and links in
/// the order they were committed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<NodeEntry>,
    #[serde(default)]
    pub links: Vec<LinkEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeEntry {
    #[serde(rename = "type")]
    pub node_type: String,
    pub var_name: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub n_in: u32,
    pub n_out: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub source: Endpoint,
    pub target: Endpoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub var_name: String,
    pub circle_index: u32,
}

impl GraphDocument {
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(json).map_err(|e| DocumentError::Json(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(|e| DocumentError::Json(e.to_string()))
    }
}

/// A trait for custom editor formats that can be turned into a [`Graph`].
///
/// [`GraphDocument`] implements it for the built-in JSON layout; implement it
/// on your own structs to feed other formats into the generator.
pub trait IntoGraph {
    fn into_graph(self) -> Result<Graph, DocumentError>;
}

impl IntoGraph for GraphDocument {
    /// Creates every node first, then commits the links in document order so
    /// that predecessor order survives a save/load cycle.
    fn into_graph(self) -> Result<Graph, DocumentError> {
        let mut graph = Graph::new();
        for node in &self.nodes {
            graph.create_node_at(
                &node.node_type,
                &node.var_name,
                node.n_in,
                node.n_out,
                Position::new(node.x, node.y),
            )?;
        }

        for link in &self.links {
            let source = lookup(&graph, &link.source.var_name)?;
            let target = lookup(&graph, &link.target.var_name)?;
            graph.connect(
                source,
                link.source.circle_index,
                target,
                link.target.circle_index,
            )?;
        }
        Ok(graph)
    }
}

fn lookup(graph: &Graph, var_name: &str) -> Result<super::NodeId, DocumentError> {
    graph
        .node_by_name(var_name)
        .map(|node| node.id())
        .ok_or_else(|| DocumentError::UnknownNode {
            var_name: var_name.to_string(),
        })
}

impl Graph {
    /// Snapshots the graph into its saved form.
    pub fn to_document(&self) -> GraphDocument {
        let nodes = self
            .nodes()
            .map(|node| NodeEntry {
                node_type: node.node_type.clone(),
                var_name: node.var_name.clone(),
                x: node.position.x,
                y: node.position.y,
                n_in: node.n_in,
                n_out: node.n_out,
            })
            .collect();

        let links = self
            .links()
            .into_iter()
            .filter_map(|link| {
                let source = self.node(link.source.node)?;
                let target = self.node(link.target.node)?;
                Some(LinkEntry {
                    source: Endpoint {
                        var_name: source.var_name.clone(),
                        circle_index: link.source.index,
                    },
                    target: Endpoint {
                        var_name: target.var_name.clone(),
                        circle_index: link.target.index,
                    },
                })
            })
            .collect();

        GraphDocument { nodes, links }
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        GraphDocument::from_json(json)?.into_graph()
    }
}
