//! Output formatting for the classification report.
//!
//! - [`csv`] - CSV output formatting
//! - [`terminal`] - Plain text report with colors

mod csv;
mod terminal;

use crate::processing::Classification;

pub use csv::{print_csv, render_csv};
pub use terminal::{format_field, print_text, render_text};

/// Report layout selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Csv,
}

/// Print `result` to stdout in the chosen format.
pub fn print_report(result: &Classification, format: ReportFormat) {
    match format {
        ReportFormat::Text => print_text(result),
        ReportFormat::Csv => print_csv(result),
    }
}
