//! CLI console utilities

use colored::*;
use tabula_core::{FieldDescriptor, Machine};

/// CLI console for formatted output
pub struct CliConsole {
    verbose: bool,
}

impl CliConsole {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.verbose {
            println!("{} {}", "ℹ".blue().bold(), message);
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message.green());
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        println!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    /// Print a header
    pub fn print_header(&self, title: &str) {
        println!();
        println!("{}", title.bold().underline());
    }

    /// Print records as an aligned table, in collection order
    pub fn print_table(&self, columns: &[FieldDescriptor], records: &[Machine]) {
        let widths: Vec<usize> = columns
            .iter()
            .map(|column| {
                records
                    .iter()
                    .filter_map(|r| r.get(&column.key))
                    .map(|v| v.chars().count())
                    .chain(std::iter::once(column.label.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(column, width)| format!("{:<width$}", column.label, width = width))
            .collect();
        println!("{}", header.join("  ").bold());

        for record in records {
            let cells: Vec<String> = columns
                .iter()
                .zip(&widths)
                .map(|(column, width)| {
                    let value = record.get(&column.key).unwrap_or_default();
                    format!("{:<width$}", value, width = width)
                })
                .collect();
            println!("{}", cells.join("  "));
        }

        if records.is_empty() {
            println!("{}", "No machines found.".dimmed());
        }
    }
}
