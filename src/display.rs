//! Display and formatting utilities for the factory planner.
//!
//! This module turns resolution results into the plain-text report printed
//! by the command-line tool.

use crate::models::ResolvedResource;

/// Formats a rate with up to three decimals, trimming trailing zeros.
///
/// # Example
///
/// ```
/// use factory_planner::display::format_rate;
///
/// assert_eq!(format_rate(4.0), "4");
/// assert_eq!(format_rate(0.625), "0.625");
/// assert_eq!(format_rate(1.33333), "1.333");
/// ```
pub fn format_rate(rate: f64) -> String {
    let formatted = format!("{:.3}", rate);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Formats one result entry as
/// `<display_name>: <count>x <facility_kind> = <throughput> units/second`.
pub fn format_resource_line(resource: &ResolvedResource) -> String {
    format!(
        "{}: {}x {} = {} units/second",
        resource.display_name,
        format_rate(resource.facility_count),
        resource.facility_kind,
        format_rate(resource.total_throughput())
    )
}

/// Builds the full report for a computation.
pub fn format_results(product: &str, rate: f64, resources: &[ResolvedResource]) -> String {
    let mut out = format!("Desired product: {}\n", product);
    out.push_str(&format!("Desired throughput: {} units/second\n", format_rate(rate)));
    out.push_str("Solution amounts:\n");
    for resource in resources {
        out.push_str(&format!("  {}\n", format_resource_line(resource)));
    }
    out
}

/// Prints the report for a computation to stdout.
pub fn display_results(product: &str, rate: f64, resources: &[ResolvedResource]) {
    print!("{}", format_results(product, rate, resources));
}
