pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{build_run_config, run_extract, url_source_from_args};

// Re-export generation functionality from imgschema-core
pub use imgschema_core::generate::{
    GenerateOptions, GenerateProgressCallback, Generation, PageOutcome, execute_generation,
};
