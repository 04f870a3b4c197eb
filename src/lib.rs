pub mod classify;
pub mod cli;
pub mod config;
pub mod env_file;
pub mod error;
pub mod logging;
pub mod run;
pub mod schema;
pub mod templates;

// Convenience re-exports
pub use classify::{classify, FieldKind, InferenceOptions};
pub use error::GenerateError;
pub use schema::{generate_schema, EnvMapping, FieldDescriptor, SchemaBuilder};
pub use templates::{generate_module, ModuleOptions};
