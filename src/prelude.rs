//! Prelude module for convenient imports
//!
//! Re-exports the types most callers need to build a graph and generate code
//! from it.
//!
//! # Example
//!
//! ```rust,no_run
//! use torchwright::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/graph.json")?;
//! let graph = Graph::from_json(&json)?;
//! let code = Codegen::builder(&graph).with_class_name("Net").build().generate()?;
//! println!("{}", code);
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::graph::{
    Graph, GraphDocument, IntoGraph, Link, LinkId, Node, NodeId, PortDirection, Position,
};

// Generation
pub use crate::catalog::{BoundaryKind, Catalog, Category};
pub use crate::codegen::{Codegen, CodegenBuilder, CodegenOptions, generate};
pub use crate::evaluator::{Binding, Resolver};

// Syntax tree
pub use crate::ast::{AstNode, PythonPrinter, factory};

// Error types
pub use crate::error::{AstError, CodegenError, DocumentError, GraphError, PortFault};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
