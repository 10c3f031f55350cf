pub mod build;
pub mod list;

pub use build::{BuildConfig, build_graph};
pub use list::{list_modules, list_operations};
