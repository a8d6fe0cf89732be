//! Tests for data models and structures.

use factory_planner::models::{
    normalize_name, FacilityKind, RecipeRecord, ResolvedResource, ThroughputRecord,
};
use factory_planner::PlannerError;

fn iron_plate() -> ThroughputRecord {
    ThroughputRecord::new("Iron Plate", FacilityKind::Furnace, 1.0, 3.5).unwrap()
}

#[test]
fn test_facility_kind_productivity() {
    assert_eq!(FacilityKind::Assembler.productivity(), 0.75);
    assert_eq!(FacilityKind::ChemicalPlant.productivity(), 1.25);
    assert_eq!(FacilityKind::Furnace.productivity(), 2.0);
    assert_eq!(FacilityKind::Mine.productivity(), 1.0);
    assert_eq!(FacilityKind::Pump.productivity(), 1.0);
    assert_eq!(FacilityKind::Centrifuge.productivity(), 0.75);
}

#[test]
fn test_facility_kind_parse() {
    assert_eq!("Assembler".parse::<FacilityKind>().unwrap(), FacilityKind::Assembler);
    assert_eq!(
        " chemical plant ".parse::<FacilityKind>().unwrap(),
        FacilityKind::ChemicalPlant
    );
    assert_eq!("PUMP".parse::<FacilityKind>().unwrap(), FacilityKind::Pump);

    for kind in FacilityKind::ALL {
        assert_eq!(kind.to_string().parse::<FacilityKind>().unwrap(), kind);
    }
}

#[test]
fn test_unknown_facility_kind() {
    let err = "Rocket Silo".parse::<FacilityKind>().unwrap_err();
    assert!(matches!(err, PlannerError::UnknownFacilityKind(ref name) if name == "Rocket Silo"));
}

#[test]
fn test_normalize_name() {
    assert_eq!(normalize_name("Electronic Circuit"), "electronic circuit");
    assert_eq!(normalize_name("\tWATER "), "water");
}

#[test]
fn test_throughput_record_creation() {
    let record = iron_plate();

    assert_eq!(record.item_id, "iron plate");
    assert_eq!(record.display_name, "Iron Plate");
    assert_eq!(record.facility_kind, FacilityKind::Furnace);
    assert!((record.unit_throughput() - 1.0 / 3.5 * 2.0).abs() < 1e-12);
}

#[test]
fn test_throughput_record_rejects_zero_duration() {
    let err = ThroughputRecord::new("Gear", FacilityKind::Assembler, 1.0, 0.0).unwrap_err();
    assert!(matches!(err, PlannerError::InvalidDuration { duration, .. } if duration == 0.0));

    let err = ThroughputRecord::new("Gear", FacilityKind::Assembler, 1.0, f64::NAN).unwrap_err();
    assert!(matches!(err, PlannerError::InvalidDuration { .. }));
}

#[test]
fn test_throughput_record_rejects_non_positive_output() {
    let err = ThroughputRecord::new("Gear", FacilityKind::Assembler, -2.0, 0.5).unwrap_err();
    assert!(matches!(err, PlannerError::InvalidOutput { output, .. } if output == -2.0));
}

#[test]
fn test_facility_count_inverts_throughput() {
    let record = iron_plate();
    let count = record.facility_count_for(4.0);

    assert!((count - 7.0).abs() < 1e-12);
    assert!((count * record.unit_throughput() - 4.0).abs() < 1e-12);
}

#[test]
fn test_recipe_set_input_replaces() {
    let mut recipe = RecipeRecord::new("Electronic Circuit");
    recipe.set_input("Iron Plate", 1.0);
    recipe.set_input("Copper Cable", 3.0);
    recipe.set_input("iron plate", 2.0);

    assert_eq!(recipe.item_id, "electronic circuit");
    assert_eq!(recipe.inputs.len(), 2);
    assert_eq!(recipe.amount_of("Iron Plate"), Some(2.0));
    assert_eq!(recipe.amount_of("copper cable"), Some(3.0));
    assert_eq!(recipe.amount_of("Steel Plate"), None);
}

#[test]
fn test_absorb_adds_incoming_count() {
    let record = iron_plate();
    let mut pooled = ResolvedResource::new(&record, 1.5);

    pooled.absorb(&ResolvedResource::new(&record, 0.2)).unwrap();
    assert!((pooled.facility_count - 1.7).abs() < 1e-12);

    pooled.absorb(&ResolvedResource::new(&record, 0.0)).unwrap();
    assert!((pooled.facility_count - 1.7).abs() < 1e-12);
}

#[test]
fn test_absorb_rejects_other_items() {
    let ore = ThroughputRecord::new("Iron Ore", FacilityKind::Mine, 1.0, 2.0).unwrap();
    let mut pooled = ResolvedResource::new(&iron_plate(), 1.0);

    let err = pooled.absorb(&ResolvedResource::new(&ore, 1.0)).unwrap_err();
    assert!(matches!(err, PlannerError::ItemMismatch { .. }));
    assert_eq!(pooled.facility_count, 1.0);
}

#[test]
fn test_total_throughput_follows_rounding() {
    let record = iron_plate();
    let mut resource = ResolvedResource::new(&record, 1.75);
    assert!((resource.total_throughput() - 1.0).abs() < 1e-12);

    resource.round_up();
    assert_eq!(resource.facility_count, 2.0);
    assert!((resource.total_throughput() - 2.0 * record.unit_throughput()).abs() < 1e-12);
}

#[test]
fn test_resolved_resource_serializes_throughput() {
    let ore = ThroughputRecord::new("Iron Ore", FacilityKind::Mine, 1.0, 2.0).unwrap();
    let resource = ResolvedResource::new(&ore, 4.0);

    let json = serde_json::to_value(&resource).unwrap();
    assert_eq!(json["item_id"], "iron ore");
    assert_eq!(json["display_name"], "Iron Ore");
    assert_eq!(json["facility_kind"], "Mine");
    assert_eq!(json["facility_count"], 4.0);
    assert_eq!(json["total_throughput"], 2.0);
}
