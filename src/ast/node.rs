/// How a method parameter is annotated when printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// The implicit receiver; printed bare.
    Receiver,
    /// No declared type; printed as `: Any`.
    Unspecified,
    /// Printed as `: <type>`.
    Type(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub(super) name: String,
    pub(super) annotation: Annotation,
}

impl Parameter {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    pub fn is_receiver(&self) -> bool {
        self.annotation == Annotation::Receiver
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub(super) name: String,
    pub(super) dtype: Option<String>,
}

impl Identifier {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> Option<&str> {
        self.dtype.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration {
    pub(super) name: String,
    pub(super) super_class: Option<String>,
    pub(super) body: Vec<AstNode>,
}

impl ClassDeclaration {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn super_class(&self) -> Option<&str> {
        self.super_class.as_deref()
    }

    pub fn body(&self) -> &[AstNode] {
        &self.body
    }
}

/// A method whose parameter list always starts with exactly one receiver.
///
/// Only the factory in [`super::factory`] builds these, which is what keeps the
/// receiver unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMethod {
    pub(super) name: String,
    pub(super) params: Vec<Parameter>,
    pub(super) body: Vec<AstNode>,
    pub(super) return_type: Option<String>,
}

impl ClassMethod {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    pub fn body(&self) -> &[AstNode] {
        &self.body
    }

    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclaration {
    pub(super) id: Identifier,
    pub(super) init: String,
}

impl VariableDeclaration {
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn init(&self) -> &str {
        &self.init
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    pub(super) source: String,
    pub(super) specifiers: Vec<String>,
    pub(super) alias: Option<String>,
}

impl ImportDeclaration {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn specifiers(&self) -> &[String] {
        &self.specifiers
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

/// The syntax tree handed to the printer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
    Program(Vec<AstNode>),
    ClassDeclaration(ClassDeclaration),
    ClassMethod(ClassMethod),
    BlockStatement(Vec<AstNode>),
    VariableDeclaration(VariableDeclaration),
    ReturnStatement(Vec<String>),
    ImportDeclaration(ImportDeclaration),
    Identifier(Identifier),
    Literal(String),
    /// The given number of blank lines.
    NewLine(usize),
    PassStatement,
}
