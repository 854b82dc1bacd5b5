//! Resolves graph nodes into expression strings.
//!
//! A [`Resolver`] lives for exactly one generation pass. It keeps its memo in
//! its own map keyed by [`NodeId`] instead of on the nodes, so a new pass
//! always starts from a clean slate and the graph itself is never mutated.

use crate::catalog::{Catalog, Category};
use crate::error::CodegenError;
use crate::graph::{Graph, NodeId};
use ahash::AHashMap;
use itertools::Itertools;
use tracing::trace;

/// The outcome of expanding one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub node: NodeId,
    /// Name the expression is bound to in the generated code.
    pub target: String,
    pub expression: String,
    pub category: Category,
}

impl Binding {
    /// Whether the generated method needs `<target> = <expression>` for this node.
    pub fn needs_declaration(&self) -> bool {
        self.category.needs_binding()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResolveState {
    InProgress,
    Resolved(usize),
}

#[derive(Debug, Clone, Copy)]
enum Visit {
    Enter(NodeId),
    Exit(NodeId),
}

pub struct Resolver<'a> {
    graph: &'a Graph,
    catalog: &'a Catalog,
    states: AHashMap<NodeId, ResolveState>,
    bindings: Vec<Binding>,
}

impl<'a> Resolver<'a> {
    pub fn new(graph: &'a Graph, catalog: &'a Catalog) -> Self {
        Self {
            graph,
            catalog,
            states: AHashMap::new(),
            bindings: Vec::new(),
        }
    }

    /// Resolves `id`, expanding it at most once per pass.
    ///
    /// The first call builds and returns the node's expression after resolving
    /// its predecessors in link-commit order. Later calls return the node's
    /// `outVarName`, so shared subgraphs are referenced by name instead of being
    /// expanded again. Re-entering a node that is still being expanded means
    /// the graph has a cycle.
    ///
    /// Expansion runs on an explicit work stack, so graph depth is bounded by
    /// memory rather than the call stack. A failed call leaves no node marked
    /// in progress; resolving it again reports the same error.
    pub fn resolve(&mut self, id: NodeId) -> Result<String, CodegenError> {
        let graph = self.graph;
        let node = graph.node(id).ok_or(CodegenError::NodeNotFound(id))?;
        if let Some(ResolveState::Resolved(_)) = self.states.get(&id) {
            return Ok(node.out_var_name());
        }

        let mut entered = Vec::new();
        if let Err(err) = self.expand(id, &mut entered) {
            for pending in entered {
                if self.states.get(&pending) == Some(&ResolveState::InProgress) {
                    self.states.remove(&pending);
                }
            }
            return Err(err);
        }

        self.binding(id)
            .map(|binding| binding.expression.clone())
            .ok_or(CodegenError::NodeNotFound(id))
    }

    /// Depth-first expansion of `root`. A node is bound on its second visit,
    /// once every predecessor is resolved.
    fn expand(&mut self, root: NodeId, entered: &mut Vec<NodeId>) -> Result<(), CodegenError> {
        let graph = self.graph;
        let mut stack = vec![Visit::Enter(root)];

        while let Some(visit) = stack.pop() {
            let id = match visit {
                Visit::Enter(id) => id,
                Visit::Exit(id) => {
                    self.bind(id)?;
                    continue;
                }
            };

            let node = graph.node(id).ok_or(CodegenError::NodeNotFound(id))?;
            match self.states.get(&id) {
                Some(ResolveState::Resolved(_)) => continue,
                // Everything above this node's exit frame descends from it.
                Some(ResolveState::InProgress) => {
                    return Err(CodegenError::CyclicGraph {
                        node: node.var_name().to_string(),
                    });
                }
                None => {}
            }
            self.states.insert(id, ResolveState::InProgress);
            entered.push(id);

            let predecessors = graph
                .predecessors_in_order(id)
                .map_err(|_| CodegenError::NodeNotFound(id))?;
            stack.push(Visit::Exit(id));
            stack.extend(predecessors.into_iter().rev().map(Visit::Enter));
        }
        Ok(())
    }

    fn bind(&mut self, id: NodeId) -> Result<(), CodegenError> {
        let graph = self.graph;
        let node = graph.node(id).ok_or(CodegenError::NodeNotFound(id))?;

        let predecessors = graph
            .predecessors_in_order(id)
            .map_err(|_| CodegenError::NodeNotFound(id))?;
        let mut names = Vec::with_capacity(predecessors.len());
        for predecessor in predecessors {
            let name = graph
                .node(predecessor)
                .map(|p| p.out_var_name())
                .ok_or(CodegenError::NodeNotFound(predecessor))?;
            names.push(name);
        }
        let args = names.iter().join(", ");

        let catalog = self.catalog;
        let category = catalog.classify(node.node_type()).ok_or_else(|| {
            CodegenError::UnclassifiedNodeType {
                node: node.var_name().to_string(),
                type_name: node.node_type().to_string(),
            }
        })?;
        let expression = category.render(node, &args);
        trace!(node = %node.var_name(), %expression, "resolved node");

        self.states
            .insert(id, ResolveState::Resolved(self.bindings.len()));
        self.bindings.push(Binding {
            node: id,
            target: node.out_var_name(),
            expression,
            category: category.clone(),
        });
        Ok(())
    }

    /// The binding recorded when `id` was expanded, if it has been.
    pub fn binding(&self, id: NodeId) -> Option<&Binding> {
        match self.states.get(&id) {
            Some(ResolveState::Resolved(index)) => self.bindings.get(*index),
            _ => None,
        }
    }

    /// Every expanded node, dependencies before dependents.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Number of nodes expanded so far in this pass.
    pub fn expansions(&self) -> usize {
        self.bindings.len()
    }

    pub fn into_bindings(self) -> Vec<Binding> {
        self.bindings
    }
}
