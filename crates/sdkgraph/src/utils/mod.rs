pub mod refs;
pub mod spec;

pub use refs::{parse_component_ref, parse_schema_ref};
pub use spec::{SpecFormat, SpecLoader, load_config, load_document};
