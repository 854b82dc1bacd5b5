use crate::codegen::Codegen;
use crate::graph::Graph;
use pyo3::prelude::*;

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string())
}

/// Generates PyTorch module source from a saved editor graph.
///
/// The graph is parsed once on construction; `generate` can then be called
/// repeatedly, each call running a fresh generation pass.
#[pyclass(name = "GraphCodegen")]
struct GraphCodegenPy {
    graph: Graph,
    class_name: String,
    super_class: Option<String>,
}

#[pymethods]
impl GraphCodegenPy {
    /// Parses the graph document.
    ///
    /// Args:
    ///     graph_json (str): The saved graph, with `nodes` and `links` arrays.
    ///     class_name (str): Name of the generated class. Defaults to "MyModel".
    ///     super_class (str | None): Base class of the generated class.
    ///
    /// Raises:
    ///     ValueError: If the JSON is malformed or a link is invalid.
    #[new]
    #[pyo3(signature = (graph_json, class_name = "MyModel", super_class = None))]
    fn new(graph_json: &str, class_name: &str, super_class: Option<String>) -> PyResult<Self> {
        let graph = Graph::from_json(graph_json).map_err(value_error)?;
        Ok(GraphCodegenPy {
            graph,
            class_name: class_name.to_string(),
            super_class,
        })
    }

    /// Returns the generated module source.
    ///
    /// Raises:
    ///     ValueError: If a node type is unknown, the graph has a cycle, or an
    ///         output is not connected.
    fn generate(&self) -> PyResult<String> {
        let mut builder = Codegen::builder(&self.graph).with_class_name(&self.class_name);
        if let Some(super_class) = &self.super_class {
            builder = builder.with_super_class(super_class);
        }
        builder.build().generate().map_err(value_error)
    }
}

/// Python bindings for the torchwright code generator.
#[pymodule]
fn torchwright(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<GraphCodegenPy>()?;
    Ok(())
}
