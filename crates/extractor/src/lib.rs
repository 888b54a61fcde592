pub mod artifacts;
pub mod builder;
pub mod graph;
pub mod render;
pub mod resolver;
