//! Common test utilities for building layer graphs.
use torchwright::prelude::*;

/// Handles of the nodes in [`create_simple_graph`].
#[allow(dead_code)]
pub struct SimpleGraph {
    pub graph: Graph,
    pub x: NodeId,
    pub conv: NodeId,
    pub y: NodeId,
}

/// `Input(x) -> Conv2d(conv_1) -> Output(y)`
#[allow(dead_code)]
pub fn create_simple_graph() -> SimpleGraph {
    let mut graph = Graph::new();
    let x = graph.create_node("Input", "x", 0, 1).unwrap();
    let conv = graph.create_node("Conv2d", "conv_1", 1, 1).unwrap();
    let y = graph.create_node("Output", "y", 1, 0).unwrap();
    graph.connect(x, 0, conv, 0).unwrap();
    graph.connect(conv, 0, y, 0).unwrap();
    SimpleGraph { graph, x, conv, y }
}

/// Handles of the nodes in [`create_diamond_graph`].
#[allow(dead_code)]
pub struct DiamondGraph {
    pub graph: Graph,
    pub x: NodeId,
    pub a: NodeId,
    pub b: NodeId,
    pub c: NodeId,
    pub d: NodeId,
    pub y: NodeId,
}

/// A diamond: `x -> a`, `a -> b`, `a -> c`, `b -> d`, `c -> d`, `d -> y`.
///
/// `a` is a convolution, `b` and `c` are activations, `d` adds them.
#[allow(dead_code)]
pub fn create_diamond_graph() -> DiamondGraph {
    let mut graph = Graph::new();
    let x = graph.create_node("Input", "x", 0, 1).unwrap();
    let a = graph.create_node("Conv2d", "a", 1, 2).unwrap();
    let b = graph.create_node("ReLU", "b", 1, 1).unwrap();
    let c = graph.create_node("Tanh", "c", 1, 1).unwrap();
    let d = graph.create_node("Add", "d", 2, 1).unwrap();
    let y = graph.create_node("Output", "y", 1, 0).unwrap();
    graph.connect(x, 0, a, 0).unwrap();
    graph.connect(a, 0, b, 0).unwrap();
    graph.connect(a, 1, c, 0).unwrap();
    graph.connect(b, 0, d, 0).unwrap();
    graph.connect(c, 0, d, 1).unwrap();
    graph.connect(d, 0, y, 0).unwrap();
    DiamondGraph {
        graph,
        x,
        a,
        b,
        c,
        d,
        y,
    }
}

/// A saved editor session with two inputs merged by a multiplication.
#[allow(dead_code)]
pub const TWO_INPUT_GRAPH_JSON: &str = r#"{
    "nodes": [
        {"type": "Input", "varName": "left", "x": 0, "y": 0, "nIn": 0, "nOut": 1},
        {"type": "Input", "varName": "right", "x": 0, "y": 100, "nIn": 0, "nOut": 1},
        {"type": "Linear", "varName": "fc", "x": 150, "y": 0, "nIn": 1, "nOut": 1},
        {"type": "Multiply", "varName": "mul", "x": 300, "y": 50, "nIn": 2, "nOut": 1},
        {"type": "Output", "varName": "out", "x": 450, "y": 50, "nIn": 1, "nOut": 0}
    ],
    "links": [
        {"source": {"varName": "left", "circleIndex": 0}, "target": {"varName": "fc", "circleIndex": 0}},
        {"source": {"varName": "right", "circleIndex": 0}, "target": {"varName": "mul", "circleIndex": 1}},
        {"source": {"varName": "fc", "circleIndex": 0}, "target": {"varName": "mul", "circleIndex": 0}},
        {"source": {"varName": "mul", "circleIndex": 0}, "target": {"varName": "out", "circleIndex": 0}}
    ]
}"#;
