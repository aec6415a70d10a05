//! CSV output of the subnet/host pairs.

use super::terminal::format_field;
use crate::error::Error;
use crate::processing::Classification;

const SUBNET_WIDTH: usize = 20;
const HOST_WIDTH: usize = 28;

fn csv_row(subnet: &str, host: &str) -> String {
    format!(
        "{subnet},{host}",
        subnet = format_field(escape_csv_field(subnet), SUBNET_WIDTH),
        host = format_field(escape_csv_field(host), HOST_WIDTH),
    )
}

/// Double any embedded quotes; [`format_field`] adds the enclosing ones.
fn escape_csv_field(input: &str) -> String {
    input.replace('"', "\"\"")
}

fn error_host(err: &Error) -> String {
    match err {
        Error::InvalidAddress { host, .. } => host.clone(),
        Error::MalformedRecord { index, .. } => format!("record#{index}"),
        other => other.to_string(),
    }
}

/// CSV lines: header, matched pairs, unmatched hosts as `None`, errors as `Error`.
pub fn render_csv(result: &Classification) -> Vec<String> {
    let mut lines = vec![csv_row("subnet", "host")];
    for (subnet, names) in result.matched() {
        let subnet = subnet.to_string();
        lines.extend(names.iter().map(|name| csv_row(&subnet, name)));
    }
    lines.extend(result.unmatched().iter().map(|name| csv_row("None", name)));
    lines.extend(
        result
            .errors()
            .iter()
            .map(|err| csv_row("Error", &error_host(err))),
    );
    lines
}

/// Print the CSV report to stdout.
pub fn print_csv(result: &Classification) {
    log::info!(
        "#Start print_csv() matched={} unmatched={} errors={}",
        result.matched_count(),
        result.unmatched().len(),
        result.errors().len()
    );
    for line in render_csv(result) {
        println!("{line}");
    }
}
