//! Constructors for every [`AstNode`] variant.
//!
//! Constructors only check shape: names are non-empty and method parameters
//! are unique once the receiver is in place.

use super::node::*;
use crate::error::AstError;

/// Name of the receiver parameter injected into every method.
pub const RECEIVER: &str = "self";

pub fn program(body: Vec<AstNode>) -> AstNode {
    AstNode::Program(body)
}

pub fn block_statement(body: Vec<AstNode>) -> AstNode {
    AstNode::BlockStatement(body)
}

pub fn class_declaration(
    name: &str,
    super_class: Option<&str>,
    body: Vec<AstNode>,
) -> Result<AstNode, AstError> {
    require_name(name, "class")?;
    Ok(AstNode::ClassDeclaration(ClassDeclaration {
        name: name.to_string(),
        super_class: super_class.map(str::to_string),
        body,
    }))
}

/// Builds a method, placing the receiver first unless it is already there.
pub fn class_method(
    name: &str,
    params: Vec<Parameter>,
    body: Vec<AstNode>,
    return_type: Option<&str>,
) -> Result<AstNode, AstError> {
    require_name(name, "method")?;
    let method = ClassMethod {
        name: name.to_string(),
        params,
        body,
        return_type: return_type.map(str::to_string),
    };
    rebuild_method(method).map(AstNode::ClassMethod)
}

/// Re-validates an existing method. Running it on an already built method
/// leaves the parameter list untouched.
pub fn rebuild_method(mut method: ClassMethod) -> Result<ClassMethod, AstError> {
    if !method.params.first().is_some_and(Parameter::is_receiver) {
        method.params.insert(0, receiver());
    }

    for (i, param) in method.params.iter().enumerate() {
        if method.params[..i].iter().any(|p| p.name == param.name) {
            return Err(AstError::DuplicateParameter {
                method: method.name.clone(),
                name: param.name.clone(),
            });
        }
    }
    Ok(method)
}

pub fn receiver() -> Parameter {
    Parameter {
        name: RECEIVER.to_string(),
        annotation: Annotation::Receiver,
    }
}

/// A method parameter. `None` prints as `Any`.
pub fn parameter(name: &str, dtype: Option<&str>) -> Result<Parameter, AstError> {
    require_name(name, "parameter")?;
    let annotation = match dtype {
        Some(dtype) => Annotation::Type(dtype.to_string()),
        None => Annotation::Unspecified,
    };
    Ok(Parameter {
        name: name.to_string(),
        annotation,
    })
}

pub fn identifier(name: &str, dtype: Option<&str>) -> Result<AstNode, AstError> {
    require_name(name, "identifier")?;
    Ok(AstNode::Identifier(Identifier {
        name: name.to_string(),
        dtype: dtype.map(str::to_string),
    }))
}

/// `<name> = <value>`, with `value` emitted verbatim.
pub fn variable_declaration(name: &str, value: &str) -> Result<AstNode, AstError> {
    require_name(name, "variable")?;
    Ok(AstNode::VariableDeclaration(VariableDeclaration {
        id: Identifier {
            name: name.to_string(),
            dtype: None,
        },
        init: value.to_string(),
    }))
}

pub fn return_statement<I, S>(arguments: I) -> AstNode
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    AstNode::ReturnStatement(arguments.into_iter().map(Into::into).collect())
}

pub fn import_declaration(
    source: &str,
    specifiers: &[&str],
    alias: Option<&str>,
) -> Result<AstNode, AstError> {
    require_name(source, "import source")?;
    Ok(AstNode::ImportDeclaration(ImportDeclaration {
        source: source.to_string(),
        specifiers: specifiers.iter().map(|s| s.to_string()).collect(),
        alias: alias.map(str::to_string),
    }))
}

pub fn literal(value: &str) -> AstNode {
    AstNode::Literal(value.to_string())
}

pub fn new_line(n: usize) -> AstNode {
    AstNode::NewLine(n)
}

pub fn pass_statement() -> AstNode {
    AstNode::PassStatement
}

fn require_name(name: &str, kind: &'static str) -> Result<(), AstError> {
    if name.is_empty() {
        Err(AstError::EmptyName { kind })
    } else {
        Ok(())
    }
}
