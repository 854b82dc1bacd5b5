//! # Torchwright - Graph to PyTorch Module Generator
//!
//! **Torchwright** turns a visually assembled graph of neural-network layers and
//! elementwise operations into the source of a PyTorch module: a class with an
//! initializer and a forward method.
//!
//! ## Core Workflow
//!
//! 1.  **Build the graph**: An editor (or a saved [`graph::GraphDocument`]) creates
//!     nodes and commits links through the [`Graph`] mutation interface.
//! 2.  **Configure**: [`Codegen::builder`] picks the class name, entry points and
//!     any extra node types.
//! 3.  **Generate**: Each pass resolves every reachable node exactly once, binds
//!     the results in the forward method, and prints the syntax tree.
//!
//! ## Quick Start
//!
//! ```rust
//! use torchwright::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut graph = Graph::new();
//!     let x = graph.create_node("Input", "x", 0, 1)?;
//!     let conv = graph.create_node("Conv2d", "conv_1", 1, 1)?;
//!     let y = graph.create_node("Output", "y", 1, 0)?;
//!     graph.connect(x, 0, conv, 0)?;
//!     graph.connect(conv, 0, y, 0)?;
//!
//!     let code = Codegen::builder(&graph).build().generate()?;
//!     assert!(code.contains("conv_1_out = self.conv_1(x)"));
//!     assert!(code.contains("return conv_1_out"));
//!     Ok(())
//! }
//! ```

pub mod ast;
pub mod catalog;
pub mod codegen;
pub mod error;
pub mod evaluator;
pub mod graph;
pub mod prelude;

pub use codegen::{Codegen, generate};
pub use graph::Graph;

#[cfg(feature = "python-bindings")]
mod python;
