//! Plain text report and terminal formatting helpers.

use crate::processing::Classification;
use colored::Colorize;
use itertools::Itertools;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

fn host_list(names: &[String]) -> String {
    format!("[{}]", names.iter().join(", "))
}

/// Report lines: one per matched subnet, then the unmatched hosts.
pub fn render_text(result: &Classification) -> Vec<String> {
    let mut lines: Vec<String> = result
        .matched()
        .map(|(subnet, names)| format!("Subnet: {subnet} Hosts: {}", host_list(names)))
        .collect();
    lines.push(format!(
        "hosts with no subnet match {}",
        host_list(result.unmatched())
    ));
    lines
}

/// Print the text report to stdout, errors last and in red.
pub fn print_text(result: &Classification) {
    for line in render_text(result) {
        log::info!("{line}");
        println!("{line}\n");
    }
    for err in result.errors() {
        log::warn!("{err}");
        println!("{} {}", "ERROR".on_red(), err.to_string().red());
    }
}
