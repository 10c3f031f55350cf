mod dependency_graph;

pub use dependency_graph::DependencyOrder;
pub(crate) use dependency_graph::{DependencyResolver, TypeGraph};

#[cfg(test)]
mod tests;
