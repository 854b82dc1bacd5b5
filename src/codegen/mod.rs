//! The generation entry point: graph in, Python module source out.

use crate::ast::AstNode;
use crate::catalog::{Catalog, Category};
use crate::error::CodegenError;
use crate::graph::{Graph, NodeId};
use tracing::info;

mod builder;

use builder::ProgramBuilder;

/// Knobs that shape the emitted class.
#[derive(Debug, Clone, PartialEq)]
pub struct CodegenOptions {
    pub class_name: String,
    pub super_class: Option<String>,
    pub forward_name: String,
    pub input_dtype: String,
    pub return_type: String,
    /// Declare `self.<name> = nn.<Type>()` in the initializer for learnable nodes.
    pub declare_submodules: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            class_name: "MyModel".to_string(),
            super_class: None,
            forward_name: "forward".to_string(),
            input_dtype: "torch.Tensor".to_string(),
            return_type: "torch.Tensor".to_string(),
            declare_submodules: false,
        }
    }
}

pub struct Codegen<'g> {
    graph: &'g Graph,
    catalog: Catalog,
    options: CodegenOptions,
    entry_points: Option<Vec<NodeId>>,
}

pub struct CodegenBuilder<'g> {
    graph: &'g Graph,
    catalog: Catalog,
    options: CodegenOptions,
    entry_points: Option<Vec<NodeId>>,
}

impl<'g> CodegenBuilder<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            catalog: Catalog::default(),
            options: CodegenOptions::default(),
            entry_points: None,
        }
    }

    pub fn with_options(mut self, options: CodegenOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_class_name(mut self, name: &str) -> Self {
        self.options.class_name = name.to_string();
        self
    }

    pub fn with_super_class(mut self, super_class: &str) -> Self {
        self.options.super_class = Some(super_class.to_string());
        self
    }

    pub fn with_forward_name(mut self, name: &str) -> Self {
        self.options.forward_name = name.to_string();
        self
    }

    pub fn with_input_dtype(mut self, dtype: &str) -> Self {
        self.options.input_dtype = dtype.to_string();
        self
    }

    pub fn with_return_type(mut self, return_type: &str) -> Self {
        self.options.return_type = return_type.to_string();
        self
    }

    pub fn with_submodule_declarations(mut self, enabled: bool) -> Self {
        self.options.declare_submodules = enabled;
        self
    }

    /// Nodes whose values the forward method returns, in return order.
    /// Defaults to the graph's `Output` nodes.
    pub fn with_entry_points(mut self, entry_points: Vec<NodeId>) -> Self {
        self.entry_points = Some(entry_points);
        self
    }

    /// Lets `user_type` render like `known_type`. Unknown targets are ignored.
    pub fn with_type_mapping(mut self, user_type: &str, known_type: &str) -> Self {
        self.catalog.alias(user_type, known_type);
        self
    }

    pub fn with_category(mut self, node_type: &str, category: Category) -> Self {
        self.catalog.insert(node_type, category);
        self
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn build(self) -> Codegen<'g> {
        Codegen {
            graph: self.graph,
            catalog: self.catalog,
            options: self.options,
            entry_points: self.entry_points,
        }
    }
}

impl<'g> Codegen<'g> {
    pub fn builder(graph: &'g Graph) -> CodegenBuilder<'g> {
        CodegenBuilder::new(graph)
    }

    pub fn options(&self) -> &CodegenOptions {
        &self.options
    }

    fn entry_points(&self) -> &[NodeId] {
        match &self.entry_points {
            Some(entry_points) => entry_points,
            None => self.graph.output_nodes(),
        }
    }

    /// Runs one generation pass and returns the syntax tree.
    ///
    /// Each call starts a fresh resolution, so repeated calls on an unchanged
    /// graph yield identical trees.
    pub fn build_program(&self) -> Result<AstNode, CodegenError> {
        let entry_points = self.entry_points();
        info!(
            nodes = self.graph.len(),
            links = self.graph.link_count(),
            entry_points = entry_points.len(),
            "starting generation pass"
        );

        let builder = ProgramBuilder::new(self.graph, &self.catalog, &self.options);
        let program = builder.build(entry_points)?;

        info!(class = %self.options.class_name, "generation pass complete");
        Ok(program)
    }

    /// Runs one generation pass and prints the result.
    pub fn generate(&self) -> Result<String, CodegenError> {
        self.build_program().map(|program| program.to_string())
    }
}

/// Generates source for `graph` with default options.
///
/// An empty `entry_points` slice means "all output nodes, in declared order".
pub fn generate(graph: &Graph, entry_points: &[NodeId]) -> Result<String, CodegenError> {
    let mut builder = Codegen::builder(graph);
    if !entry_points.is_empty() {
        builder = builder.with_entry_points(entry_points.to_vec());
    }
    builder.build().generate()
}
