//! Tests for display and formatting utilities.

use factory_planner::display::{format_rate, format_resource_line, format_results};
use factory_planner::models::{FacilityKind, ResolvedResource, ThroughputRecord};

fn plate_resource(count: f64) -> ResolvedResource {
    let record = ThroughputRecord::new("Iron Plate", FacilityKind::Furnace, 1.0, 3.5).unwrap();
    ResolvedResource::new(&record, count)
}

#[test]
fn test_format_rate_whole_numbers() {
    assert_eq!(format_rate(0.0), "0");
    assert_eq!(format_rate(12.0), "12");
    assert_eq!(format_rate(100.0), "100");
}

#[test]
fn test_format_rate_fractions() {
    assert_eq!(format_rate(0.5), "0.5");
    assert_eq!(format_rate(1.142857), "1.143");
    assert_eq!(format_rate(2.0004), "2");
}

#[test]
fn test_format_resource_line() {
    assert_eq!(
        format_resource_line(&plate_resource(2.0)),
        "Iron Plate: 2x Furnace = 1.143 units/second"
    );
}

#[test]
fn test_format_resource_line_multi_word_kind() {
    let record = ThroughputRecord::new("Plastic Bar", FacilityKind::ChemicalPlant, 2.0, 1.0).unwrap();
    let resource = ResolvedResource::new(&record, 3.0);

    assert_eq!(
        format_resource_line(&resource),
        "Plastic Bar: 3x Chemical Plant = 7.5 units/second"
    );
}

#[test]
fn test_format_results() {
    let report = format_results("Iron Plate", 1.0, &[plate_resource(2.0)]);

    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Desired product: Iron Plate",
            "Desired throughput: 1 units/second",
            "Solution amounts:",
            "  Iron Plate: 2x Furnace = 1.143 units/second",
        ]
    );
}

#[test]
fn test_format_results_terminates_every_line() {
    let report = format_results("Iron Plate", 0.5, &[plate_resource(1.0), plate_resource(3.0)]);

    assert_eq!(
        report,
        "Desired product: Iron Plate\n\
         Desired throughput: 0.5 units/second\n\
         Solution amounts:\n  \
         Iron Plate: 1x Furnace = 0.571 units/second\n  \
         Iron Plate: 3x Furnace = 1.714 units/second\n"
    );
    assert_eq!(
        format_results("Iron Ore", 0.0, &[]),
        "Desired product: Iron Ore\nDesired throughput: 0 units/second\nSolution amounts:\n"
    );
}

#[test]
fn test_format_results_empty() {
    let report = format_results("Nothing", 0.0, &[]);
    assert!(report.ends_with("Solution amounts:\n"));
}
