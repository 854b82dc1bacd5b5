//! Maps node type names onto the category that decides how a node renders.
//!
//! Every type belongs to exactly one [`Category`]; the catalog is a map keyed
//! by type name, so two categories can never claim the same type.

use crate::graph::Node;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Which edge of the generated forward method a boundary node sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryKind {
    Input,
    Output,
}

/// How a resolved node turns into an expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Carries trainable state: `self.<varName>(<args>)`.
    Learnable,
    /// Stateless functional layer: `<namespace>.<varName>(<args>)`.
    Stateless { namespace: String },
    /// Elementwise operator: `<namespace>.<snake_case(type)>(<args>)`.
    Operator { namespace: String },
    /// Forward-method parameter or return value. Emits no statement.
    Boundary(BoundaryKind),
}

impl Category {
    pub fn stateless() -> Self {
        Category::Stateless {
            namespace: "F".to_string(),
        }
    }

    pub fn operator() -> Self {
        Category::Operator {
            namespace: "torch".to_string(),
        }
    }

    /// Builds the expression for `node` given its comma-joined argument list.
    pub fn render(&self, node: &Node, args: &str) -> String {
        match self {
            Category::Learnable => format!("self.{}({})", node.var_name(), args),
            Category::Stateless { namespace } => {
                format!("{}.{}({})", namespace, node.var_name(), args)
            }
            Category::Operator { namespace } => {
                format!("{}.{}({})", namespace, snake_case(node.node_type()), args)
            }
            Category::Boundary(BoundaryKind::Input) => node.var_name().to_string(),
            Category::Boundary(BoundaryKind::Output) => args.to_string(),
        }
    }

    /// Whether the generator binds this node's expression to its `outVarName`.
    pub fn needs_binding(&self) -> bool {
        !matches!(self, Category::Boundary(_))
    }
}

/// Lower-cases `name`, inserting `_` before every capital except a leading one.
///
/// `MultiplyAdd` becomes `multiply_add`.
pub fn snake_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.extend(c.to_lowercase());
    }
    result
}

/// Registry of known node types.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: AHashMap<String, Category>,
}

/// Defines the built-in type lists once and derives the default registry from them.
macro_rules! define_catalog {
    (
        learnable: [$($learnable:literal),* $(,)?],
        stateless: [$($stateless:literal),* $(,)?],
        operator: [$($operator:literal),* $(,)?] $(,)?
    ) => {
        /// Types with trainable state.
        pub const LEARNABLE_TYPES: &[&str] = &[$($learnable),*];
        /// Stateless functional layers.
        pub const STATELESS_TYPES: &[&str] = &[$($stateless),*];
        /// Elementwise operators.
        pub const OPERATOR_TYPES: &[&str] = &[$($operator),*];

        impl Default for Catalog {
            fn default() -> Self {
                let mut entries = AHashMap::new();
                $( entries.insert($learnable.to_string(), Category::Learnable); )*
                $( entries.insert($stateless.to_string(), Category::stateless()); )*
                $( entries.insert($operator.to_string(), Category::operator()); )*
                entries.insert(
                    crate::graph::INPUT_TYPE.to_string(),
                    Category::Boundary(BoundaryKind::Input),
                );
                entries.insert(
                    crate::graph::OUTPUT_TYPE.to_string(),
                    Category::Boundary(BoundaryKind::Output),
                );
                Self { entries }
            }
        }
    };
}

define_catalog! {
    learnable: ["Conv2d", "Linear", "BatchNorm2d", "Dropout"],
    stateless: [
        "Flatten",
        "ReLU",
        "Tanh",
        "Sigmoid",
        "Softmax",
        "Softmax2d",
        "LogSoftmax",
        "LogSigmoid",
        "Identity",
        "MaxPool2d",
        "AvgPool2d",
        "AdaptiveAvgPool2d",
        "AdaptiveMaxPool2d",
    ],
    operator: ["Add", "Multiply"],
}

impl Catalog {
    /// A catalog with no entries at all, not even the boundary types.
    pub fn empty() -> Self {
        Self {
            entries: AHashMap::new(),
        }
    }

    pub fn classify(&self, node_type: &str) -> Option<&Category> {
        self.entries.get(node_type)
    }

    /// Registers `node_type`, replacing any previous category for it.
    pub fn insert(&mut self, node_type: &str, category: Category) -> Option<Category> {
        self.entries.insert(node_type.to_string(), category)
    }

    /// Makes `user_type` render the same way as the already known `known_type`.
    /// Returns `false` and changes nothing when `known_type` is not registered.
    pub fn alias(&mut self, user_type: &str, known_type: &str) -> bool {
        match self.entries.get(known_type).cloned() {
            Some(category) => {
                self.entries.insert(user_type.to_string(), category);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_splits_on_capitals() {
        assert_eq!(snake_case("Add"), "add");
        assert_eq!(snake_case("MultiplyAdd"), "multiply_add");
        assert_eq!(snake_case("ReLU"), "re_l_u");
        assert_eq!(snake_case(""), "");
    }

    #[test]
    fn default_catalog_lists_are_disjoint() {
        let catalog = Catalog::default();
        let listed = LEARNABLE_TYPES.len() + STATELESS_TYPES.len() + OPERATOR_TYPES.len() + 2;
        assert_eq!(catalog.len(), listed);
    }

    #[test]
    fn alias_requires_known_target() {
        let mut catalog = Catalog::default();
        assert!(catalog.alias("MyConv", "Conv2d"));
        assert_eq!(catalog.classify("MyConv"), Some(&Category::Learnable));
        assert!(!catalog.alias("Mystery", "NotAType"));
        assert_eq!(catalog.classify("Mystery"), None);
    }
}
