//! Tests for whole-module generation.
mod common;
use common::*;
use pretty_assertions::assert_eq;
use torchwright::prelude::*;

#[test]
fn test_simple_graph_renders_exact_module() {
    let SimpleGraph { graph, .. } = create_simple_graph();
    let code = Codegen::builder(&graph).build().generate().unwrap();

    let expected = "import torch\n\
                    \n\
                    \n\
                    class MyModel():\n    \
                    def __init__(self) -> None:\n        \
                    pass\n\
                    \n    \
                    def forward(self, x: torch.Tensor) -> torch.Tensor:\n        \
                    conv_1_out = self.conv_1(x)\n        \
                    return conv_1_out\n\
                    \n";
    assert_eq!(code, expected);
}

#[test]
fn test_free_function_defaults_to_output_nodes() {
    let SimpleGraph { graph, .. } = create_simple_graph();
    let via_builder = Codegen::builder(&graph).build().generate().unwrap();
    assert_eq!(generate(&graph, &[]).unwrap(), via_builder);
}

#[test]
fn test_shared_node_is_declared_once() {
    let DiamondGraph { graph, .. } = create_diamond_graph();
    let code = generate(&graph, &[]).unwrap();

    let expected = "import torch\n\
                    import torch.nn.functional as F\n\
                    \n\
                    \n\
                    class MyModel():\n    \
                    def __init__(self) -> None:\n        \
                    pass\n\
                    \n    \
                    def forward(self, x: torch.Tensor) -> torch.Tensor:\n        \
                    a_out = self.a(x)\n        \
                    b_out = F.b(a_out)\n        \
                    c_out = F.c(a_out)\n        \
                    d_out = torch.add(b_out, c_out)\n        \
                    return d_out\n\
                    \n";
    assert_eq!(code, expected);
    assert_eq!(code.matches("self.a(").count(), 1);
}

#[test]
fn test_submodule_declarations_fill_initializer() {
    let DiamondGraph { graph, .. } = create_diamond_graph();
    let code = Codegen::builder(&graph)
        .with_class_name("Net")
        .with_super_class("nn.Module")
        .with_submodule_declarations(true)
        .build()
        .generate()
        .unwrap();

    assert!(code.starts_with(
        "import torch\nimport torch.nn as nn\nimport torch.nn.functional as F\n\n\nclass Net(nn.Module):\n"
    ));
    assert!(code.contains("    def __init__(self) -> None:\n        self.a = nn.Conv2d()\n\n"));
    assert!(!code.contains("        pass\n"));
}

#[test]
fn test_arguments_follow_commit_order_not_port_index() {
    let graph = Graph::from_json(TWO_INPUT_GRAPH_JSON).unwrap();
    let code = Codegen::builder(&graph).build().generate().unwrap();

    let expected = "import torch\n\
                    \n\
                    \n\
                    class MyModel():\n    \
                    def __init__(self) -> None:\n        \
                    pass\n\
                    \n    \
                    def forward(self, left: torch.Tensor, right: torch.Tensor) -> torch.Tensor:\n        \
                    fc_out = self.fc(left)\n        \
                    mul_out = torch.multiply(right, fc_out)\n        \
                    return mul_out\n\
                    \n";
    assert_eq!(code, expected);
}

#[test]
fn test_generation_is_repeatable() {
    let DiamondGraph { graph, .. } = create_diamond_graph();
    let codegen = Codegen::builder(&graph).build();
    let first = codegen.generate().unwrap();
    let second = codegen.generate().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_multiple_outputs_return_a_tuple() {
    let mut graph = Graph::new();
    let x = graph.create_node("Input", "x", 0, 2).unwrap();
    let a = graph.create_node("ReLU", "a", 1, 1).unwrap();
    let b = graph.create_node("Sigmoid", "b", 1, 1).unwrap();
    let first = graph.create_node("Output", "first", 1, 0).unwrap();
    let second = graph.create_node("Output", "second", 1, 0).unwrap();
    graph.connect(x, 0, a, 0).unwrap();
    graph.connect(x, 1, b, 0).unwrap();
    graph.connect(a, 0, first, 0).unwrap();
    graph.connect(b, 0, second, 0).unwrap();

    let code = generate(&graph, &[]).unwrap();
    assert!(code.contains(
        "    def forward(self, x: torch.Tensor) -> tuple[torch.Tensor, torch.Tensor]:\n"
    ));
    assert!(code.contains("        return a_out, b_out\n"));

    // Explicit entry points reorder the tuple.
    let code = generate(&graph, &[second, first]).unwrap();
    assert!(code.contains("        return b_out, a_out\n"));
}

#[test]
fn test_non_output_entry_point_returns_bound_name() {
    let SimpleGraph { graph, conv, .. } = create_simple_graph();
    let code = generate(&graph, &[conv]).unwrap();
    assert!(code.contains("        conv_1_out = self.conv_1(x)\n        return conv_1_out\n"));
}

#[test]
fn test_graph_without_outputs_returns_nothing() {
    let mut graph = Graph::new();
    graph.create_node("Input", "x", 0, 1).unwrap();
    let code = generate(&graph, &[]).unwrap();
    assert!(code.contains("    def forward(self, x: torch.Tensor) -> None:\n        pass\n"));
}

#[test]
fn test_disconnected_output_is_an_error() {
    let mut graph = Graph::new();
    graph.create_node("Input", "x", 0, 1).unwrap();
    graph.create_node("Output", "y", 1, 0).unwrap();
    assert_eq!(
        generate(&graph, &[]).unwrap_err(),
        CodegenError::DisconnectedOutput {
            node: "y".to_string()
        }
    );
}

#[test]
fn test_unknown_type_fails_until_mapped() {
    let mut graph = Graph::new();
    let x = graph.create_node("Input", "x", 0, 1).unwrap();
    let conv = graph.create_node("MyConv", "conv", 1, 1).unwrap();
    let y = graph.create_node("Output", "y", 1, 0).unwrap();
    graph.connect(x, 0, conv, 0).unwrap();
    graph.connect(conv, 0, y, 0).unwrap();

    assert!(matches!(
        generate(&graph, &[]),
        Err(CodegenError::UnclassifiedNodeType { .. })
    ));

    let code = Codegen::builder(&graph)
        .with_type_mapping("MyConv", "Conv2d")
        .build()
        .generate()
        .unwrap();
    assert!(code.contains("        conv_out = self.conv(x)\n"));
}

#[test]
fn test_options_shape_the_signature() {
    let SimpleGraph { graph, .. } = create_simple_graph();
    let options = CodegenOptions {
        forward_name: "__call__".to_string(),
        input_dtype: "Tensor".to_string(),
        return_type: "Tensor".to_string(),
        ..CodegenOptions::default()
    };
    let codegen = Codegen::builder(&graph).with_options(options).build();
    assert_eq!(codegen.options().class_name, "MyModel");

    let code = codegen.generate().unwrap();
    assert!(code.contains("    def __call__(self, x: Tensor) -> Tensor:\n"));
}

#[test]
fn test_custom_category_changes_namespace() {
    let DiamondGraph { graph, .. } = create_diamond_graph();
    let code = Codegen::builder(&graph)
        .with_category("ReLU", Category::Stateless {
            namespace: "torch.relu_ops".to_string(),
        })
        .build()
        .generate()
        .unwrap();
    assert!(code.contains("        b_out = torch.relu_ops.b(a_out)\n"));
    // Tanh still uses F, so the functional import stays.
    assert!(code.contains("import torch.nn.functional as F\n"));
}

#[test]
fn test_build_program_matches_generate() {
    let SimpleGraph { graph, .. } = create_simple_graph();
    let codegen = Codegen::builder(&graph).build();
    let program = codegen.build_program().unwrap();
    assert!(matches!(program, AstNode::Program(_)));
    assert_eq!(PythonPrinter::print(&program), codegen.generate().unwrap());
}
