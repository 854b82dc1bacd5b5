use super::node::*;
use itertools::Itertools;
use std::fmt;

const INDENT: &str = "    ";

/// Renders an [`AstNode`] as Python source.
///
/// Each statement writes its own trailing newline; identifiers and literals
/// are expressions and write none.
pub struct PythonPrinter;

impl PythonPrinter {
    pub fn print(node: &AstNode) -> String {
        Self::print_at(node, 0)
    }

    /// Renders `node` as if it were nested `indent` levels deep, so a subtree
    /// can be spliced into surrounding source.
    pub fn print_at(node: &AstNode, indent: usize) -> String {
        Indented { node, indent }.to_string()
    }

    fn write_node(f: &mut fmt::Formatter<'_>, node: &AstNode, indent: usize) -> fmt::Result {
        let pad = INDENT.repeat(indent);
        match node {
            AstNode::Program(body) => {
                for child in body {
                    Self::write_node(f, child, indent)?;
                }
            }
            AstNode::BlockStatement(body) => {
                for child in body {
                    Self::write_node(f, child, indent + 1)?;
                }
            }
            AstNode::ClassDeclaration(class) => {
                writeln!(
                    f,
                    "{}class {}({}):",
                    pad,
                    class.name,
                    class.super_class.as_deref().unwrap_or("")
                )?;
                for member in &class.body {
                    Self::write_node(f, member, indent + 1)?;
                    writeln!(f)?;
                }
            }
            AstNode::ClassMethod(method) => Self::write_method(f, method, indent)?,
            AstNode::VariableDeclaration(decl) => {
                writeln!(f, "{}{} = {}", pad, decl.id.name, decl.init)?
            }
            AstNode::ReturnStatement(arguments) => {
                writeln!(f, "{}return {}", pad, arguments.iter().join(", "))?
            }
            AstNode::ImportDeclaration(import) => {
                if !import.specifiers.is_empty() {
                    writeln!(
                        f,
                        "{}from {} import {}",
                        pad,
                        import.source,
                        import.specifiers.iter().join(", ")
                    )?;
                } else if let Some(alias) = &import.alias {
                    writeln!(f, "{}import {} as {}", pad, import.source, alias)?;
                } else {
                    writeln!(f, "{}import {}", pad, import.source)?;
                }
            }
            AstNode::Identifier(identifier) => write!(f, "{}", identifier.name)?,
            AstNode::Literal(value) => write!(f, "{}", value)?,
            AstNode::NewLine(n) => {
                for _ in 0..*n {
                    writeln!(f)?;
                }
            }
            AstNode::PassStatement => writeln!(f, "{}pass", pad)?,
        }
        Ok(())
    }

    fn write_method(f: &mut fmt::Formatter<'_>, method: &ClassMethod, indent: usize) -> fmt::Result {
        let params = method.params.iter().map(|param| match &param.annotation {
            Annotation::Receiver => param.name.clone(),
            Annotation::Unspecified => format!("{}: Any", param.name),
            Annotation::Type(dtype) => format!("{}: {}", param.name, dtype),
        });
        writeln!(
            f,
            "{}def {}({}) -> {}:",
            INDENT.repeat(indent),
            method.name,
            params.format(", "),
            method.return_type.as_deref().unwrap_or("None")
        )?;

        if method.body.is_empty() {
            return Self::write_node(f, &AstNode::PassStatement, indent + 1);
        }
        for statement in &method.body {
            Self::write_node(f, statement, indent + 1)?;
        }
        Ok(())
    }
}

struct Indented<'a> {
    node: &'a AstNode,
    indent: usize,
}

impl fmt::Display for Indented<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        PythonPrinter::write_node(f, self.node, self.indent)
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        PythonPrinter::write_node(f, self, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::factory::*;
    use super::*;

    #[test]
    fn import_forms() {
        let from = import_declaration("typing", &["Any", "Tuple"], None).unwrap();
        let aliased = import_declaration("torch.nn", &[], Some("nn")).unwrap();
        let plain = import_declaration("torch", &[], None).unwrap();
        assert_eq!(from.to_string(), "from typing import Any, Tuple\n");
        assert_eq!(aliased.to_string(), "import torch.nn as nn\n");
        assert_eq!(plain.to_string(), "import torch\n");
    }

    #[test]
    fn specifiers_win_over_alias() {
        let import = import_declaration("torch", &["nn"], Some("t")).unwrap();
        assert_eq!(import.to_string(), "from torch import nn\n");
    }

    #[test]
    fn expressions_have_no_trailing_newline() {
        assert_eq!(identifier("x", Some("int")).unwrap().to_string(), "x");
        assert_eq!(literal("3.5").to_string(), "3.5");
    }

    #[test]
    fn return_joins_arguments() {
        assert_eq!(return_statement(["a", "b"]).to_string(), "return a, b\n");
    }

    #[test]
    fn new_line_emits_blank_lines() {
        assert_eq!(new_line(3).to_string(), "\n\n\n");
        assert_eq!(new_line(0).to_string(), "");
    }

    #[test]
    fn block_statement_indents_children() {
        let block = block_statement(vec![
            variable_declaration("a", "1").unwrap(),
            pass_statement(),
        ]);
        assert_eq!(block.to_string(), "    a = 1\n    pass\n");
    }
}
