pub mod factory;
pub mod node;
pub mod printer;

pub use node::*;
pub use printer::PythonPrinter;
