pub mod ast_display;
pub mod ast_nodes;
pub mod dump_reader;
pub mod operators;

#[cfg(test)]
mod tests;
