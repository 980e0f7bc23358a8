//! Optimization stage of a small procedural-language compiler.
//!
//! Takes a parsed syntax tree and rewrites it with constant folding, dead-code elimination
//! and loop unrolling, producing a simpler tree for code generation.

pub mod compiler_frontend;

pub mod build_system {
    pub mod build;
}

pub mod projects {
    pub mod cli;
    pub mod settings;
}

pub use compiler_frontend::ast::ast_nodes::{Link, Node};
pub use compiler_frontend::ast::operators::{BinaryOperator, UnaryOperator};
pub use compiler_frontend::optimizers::{
    OptimizationReport, OptimizerSettings, optimize, optimize_with,
};
