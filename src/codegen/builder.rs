use super::CodegenOptions;
use crate::ast::AstNode;
use crate::ast::factory::*;
use crate::catalog::{BoundaryKind, Catalog, Category};
use crate::error::CodegenError;
use crate::evaluator::{Binding, Resolver};
use crate::graph::{Graph, NodeId};
use itertools::Itertools;

/// Assembles the module tree for one generation pass.
pub(super) struct ProgramBuilder<'a> {
    graph: &'a Graph,
    catalog: &'a Catalog,
    options: &'a CodegenOptions,
}

impl<'a> ProgramBuilder<'a> {
    pub(super) fn new(graph: &'a Graph, catalog: &'a Catalog, options: &'a CodegenOptions) -> Self {
        Self {
            graph,
            catalog,
            options,
        }
    }

    pub(super) fn build(&self, entry_points: &[NodeId]) -> Result<AstNode, CodegenError> {
        let mut resolver = Resolver::new(self.graph, self.catalog);
        let mut returns = Vec::with_capacity(entry_points.len());
        for &entry in entry_points {
            resolver.resolve(entry)?;
            returns.push(self.return_value(&resolver, entry)?);
        }
        let bindings = resolver.into_bindings();

        let init = self.init_method(&bindings)?;
        let forward = self.forward_method(&bindings, returns)?;
        let class = class_declaration(
            &self.options.class_name,
            self.options.super_class.as_deref(),
            vec![init, forward],
        )?;

        let mut body = self.imports(&bindings)?;
        body.push(new_line(2));
        body.push(class);
        Ok(program(body))
    }

    /// What the return statement lists for one entry point: the pass-through
    /// value of an `Output` node, or the bound name of any other node.
    fn return_value(&self, resolver: &Resolver<'_>, entry: NodeId) -> Result<String, CodegenError> {
        let binding = resolver
            .binding(entry)
            .ok_or(CodegenError::NodeNotFound(entry))?;
        match binding.category {
            Category::Boundary(BoundaryKind::Output) if binding.expression.is_empty() => {
                Err(CodegenError::DisconnectedOutput {
                    node: binding.target.clone(),
                })
            }
            Category::Boundary(BoundaryKind::Output) => Ok(binding.expression.clone()),
            _ => Ok(binding.target.clone()),
        }
    }

    fn imports(&self, bindings: &[Binding]) -> Result<Vec<AstNode>, CodegenError> {
        let mut imports = vec![import_declaration("torch", &[], None)?];
        if self.options.declare_submodules {
            imports.push(import_declaration("torch.nn", &[], Some("nn"))?);
        }
        let uses_functional = bindings.iter().any(|b| {
            matches!(&b.category, Category::Stateless { namespace } if namespace == "F")
        });
        if uses_functional {
            imports.push(import_declaration("torch.nn.functional", &[], Some("F"))?);
        }
        Ok(imports)
    }

    fn init_method(&self, bindings: &[Binding]) -> Result<AstNode, CodegenError> {
        let mut body = Vec::new();
        if self.options.declare_submodules {
            for binding in bindings.iter().filter(|b| b.category == Category::Learnable) {
                let node = self
                    .graph
                    .node(binding.node)
                    .ok_or(CodegenError::NodeNotFound(binding.node))?;
                body.push(variable_declaration(
                    &format!("self.{}", node.var_name()),
                    &format!("nn.{}()", node.node_type()),
                )?);
            }
        }
        Ok(class_method("__init__", vec![], body, Some("None"))?)
    }

    fn forward_method(
        &self,
        bindings: &[Binding],
        returns: Vec<String>,
    ) -> Result<AstNode, CodegenError> {
        let mut params = Vec::with_capacity(self.graph.input_nodes().len());
        for &input in self.graph.input_nodes() {
            let node = self
                .graph
                .node(input)
                .ok_or(CodegenError::NodeNotFound(input))?;
            params.push(parameter(node.var_name(), Some(&self.options.input_dtype))?);
        }

        let mut body = Vec::new();
        for binding in bindings.iter().filter(|b| b.needs_declaration()) {
            body.push(variable_declaration(&binding.target, &binding.expression)?);
        }

        let return_type = match returns.len() {
            0 => None,
            1 => Some(self.options.return_type.clone()),
            n => Some(format!(
                "tuple[{}]",
                std::iter::repeat_n(self.options.return_type.as_str(), n).join(", ")
            )),
        };
        if !returns.is_empty() {
            body.push(return_statement(returns));
        }

        Ok(class_method(
            &self.options.forward_name,
            params,
            body,
            return_type.as_deref(),
        )?)
    }
}
