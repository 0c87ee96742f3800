pub mod config;
pub mod error;
pub mod export;
pub mod generate;
pub mod input;
pub mod report;
pub mod schema;

use colored::Colorize;

pub use error::{ConfigError, ExportError, GenerateError, InputError};
pub use export::{CsvExport, ExportCache};
pub use generate::{GenerateOptions, Generation, PageOutcome, execute_generation};
pub use schema::{PageSchema, ResultRow};

/// Written to stderr so CSV on stdout stays clean.
pub fn print_banner() {
    eprintln!(
        "{} {}",
        "imgschema".bright_cyan().bold(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
    eprintln!("{}", "schema.org ImageObject JSON-LD for your pages".dimmed());
    eprintln!();
}
