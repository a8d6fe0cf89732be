//! Data models and structures for the factory planner.
//!
//! This module contains the records shared by the loader, the resolver and
//! the presenter: facility kinds, per-item throughput, recipe inputs and
//! resolved facility counts.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{PlannerError, Result};
use crate::resolver::fudged_ceil;

/// Returns the canonical lookup key for an item name.
///
/// Item identity is case-insensitive; surrounding whitespace is ignored.
///
/// # Example
///
/// ```
/// use factory_planner::models::normalize_name;
///
/// assert_eq!(normalize_name("  Iron Gear Wheel "), "iron gear wheel");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The type of machine that produces an item.
///
/// Each kind carries a fixed productivity multiplier applied on top of the
/// raw `unit_output / cycle_duration` rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacilityKind {
    Assembler,
    ChemicalPlant,
    Furnace,
    Mine,
    Pump,
    Centrifuge,
}

impl FacilityKind {
    /// Every known facility kind.
    pub const ALL: [FacilityKind; 6] = [
        FacilityKind::Assembler,
        FacilityKind::ChemicalPlant,
        FacilityKind::Furnace,
        FacilityKind::Mine,
        FacilityKind::Pump,
        FacilityKind::Centrifuge,
    ];

    /// Productivity multiplier of this facility kind.
    ///
    /// # Example
    ///
    /// ```
    /// use factory_planner::models::FacilityKind;
    ///
    /// assert_eq!(FacilityKind::Furnace.productivity(), 2.0);
    /// assert_eq!(FacilityKind::Assembler.productivity(), 0.75);
    /// ```
    pub const fn productivity(self) -> f64 {
        match self {
            // Blue assembler
            FacilityKind::Assembler => 0.75,
            FacilityKind::ChemicalPlant => 1.25,
            // Electric furnace
            FacilityKind::Furnace => 2.0,
            FacilityKind::Mine => 1.0,
            FacilityKind::Pump => 1.0,
            FacilityKind::Centrifuge => 0.75,
        }
    }

    /// The label used for this kind in the throughput table.
    pub const fn label(self) -> &'static str {
        match self {
            FacilityKind::Assembler => "Assembler",
            FacilityKind::ChemicalPlant => "Chemical Plant",
            FacilityKind::Furnace => "Furnace",
            FacilityKind::Mine => "Mine",
            FacilityKind::Pump => "Pump",
            FacilityKind::Centrifuge => "Centrifuge",
        }
    }
}

impl fmt::Display for FacilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FacilityKind {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        FacilityKind::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PlannerError::UnknownFacilityKind(wanted.to_string()))
    }
}

impl Serialize for FacilityKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Per-facility production data for one item.
///
/// Raw resources have a throughput record too: it describes the machine
/// that mines or pumps them.
///
/// # Example
///
/// ```
/// use factory_planner::models::{FacilityKind, ThroughputRecord};
///
/// let plate = ThroughputRecord::new("Iron Plate", FacilityKind::Furnace, 1.0, 3.2).unwrap();
/// assert_eq!(plate.item_id, "iron plate");
/// assert!((plate.unit_throughput() - 0.625).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ThroughputRecord {
    /// Normalized lookup key
    pub item_id: String,
    /// Original-case label used for output
    pub display_name: String,
    /// Machine that produces the item
    pub facility_kind: FacilityKind,
    /// Units produced per facility cycle
    pub unit_output: f64,
    /// Seconds per facility cycle
    pub cycle_duration: f64,
    unit_throughput: f64,
}

impl ThroughputRecord {
    /// Builds a record, rejecting non-positive outputs and durations.
    pub fn new(
        display_name: &str,
        facility_kind: FacilityKind,
        unit_output: f64,
        cycle_duration: f64,
    ) -> Result<Self> {
        let display_name = display_name.trim().to_string();
        if !cycle_duration.is_finite() || cycle_duration <= 0.0 {
            return Err(PlannerError::InvalidDuration {
                item: display_name,
                duration: cycle_duration,
            });
        }
        if !unit_output.is_finite() || unit_output <= 0.0 {
            return Err(PlannerError::InvalidOutput {
                item: display_name,
                output: unit_output,
            });
        }

        let unit_throughput = unit_output / cycle_duration * facility_kind.productivity();
        Ok(Self {
            item_id: normalize_name(&display_name),
            display_name,
            facility_kind,
            unit_output,
            cycle_duration,
            unit_throughput,
        })
    }

    /// Units per second produced by a single facility.
    pub fn unit_throughput(&self) -> f64 {
        self.unit_throughput
    }

    /// Fractional number of facilities needed to sustain `rate` units/second.
    pub fn facility_count_for(&self, rate: f64) -> f64 {
        rate * self.cycle_duration / self.unit_output / self.facility_kind.productivity()
    }
}

/// The inputs consumed to produce one unit of an item.
///
/// Items without inputs (raw resources) have no recipe record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeRecord {
    pub item_id: String,
    pub display_name: String,
    /// (input item_id, amount per unit of output); input ids are unique
    pub inputs: Vec<(String, f64)>,
}

impl RecipeRecord {
    pub fn new(display_name: &str) -> Self {
        let display_name = display_name.trim().to_string();
        Self {
            item_id: normalize_name(&display_name),
            display_name,
            inputs: Vec::new(),
        }
    }

    /// Sets the amount of `input_id` per unit, replacing any earlier amount.
    pub fn set_input(&mut self, input_id: &str, amount: f64) {
        let input_id = normalize_name(input_id);
        match self.inputs.iter_mut().find(|(id, _)| *id == input_id) {
            Some(entry) => entry.1 = amount,
            None => self.inputs.push((input_id, amount)),
        }
    }

    /// Amount of `input_id` consumed per unit of output, if it is an input.
    pub fn amount_of(&self, input_id: &str) -> Option<f64> {
        let input_id = normalize_name(input_id);
        self.inputs
            .iter()
            .find(|(id, _)| *id == input_id)
            .map(|(_, amount)| *amount)
    }
}

/// The facility requirement for one item in a resolution result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedResource {
    pub item_id: String,
    pub display_name: String,
    pub facility_kind: FacilityKind,
    /// Fractional while pooling, integer-valued once rounded
    pub facility_count: f64,
    unit_throughput: f64,
}

impl ResolvedResource {
    pub fn new(record: &ThroughputRecord, facility_count: f64) -> Self {
        Self {
            item_id: record.item_id.clone(),
            display_name: record.display_name.clone(),
            facility_kind: record.facility_kind,
            facility_count,
            unit_throughput: record.unit_throughput(),
        }
    }

    /// Units per second delivered by `facility_count` facilities.
    pub fn total_throughput(&self) -> f64 {
        self.unit_throughput * self.facility_count
    }

    /// Adds the facility count of `other` into this entry.
    ///
    /// # Example
    ///
    /// ```
    /// use factory_planner::models::{FacilityKind, ResolvedResource, ThroughputRecord};
    ///
    /// let ore = ThroughputRecord::new("Iron Ore", FacilityKind::Mine, 1.0, 2.0).unwrap();
    /// let mut pooled = ResolvedResource::new(&ore, 1.5);
    /// pooled.absorb(&ResolvedResource::new(&ore, 0.25)).unwrap();
    /// assert_eq!(pooled.facility_count, 1.75);
    /// ```
    pub fn absorb(&mut self, other: &ResolvedResource) -> Result<()> {
        if self.item_id != other.item_id {
            return Err(PlannerError::ItemMismatch {
                expected: self.item_id.clone(),
                found: other.item_id.clone(),
            });
        }
        self.facility_count += other.facility_count;
        Ok(())
    }

    /// Rounds the facility count up, tolerating floating-point noise.
    pub fn round_up(&mut self) {
        self.facility_count = fudged_ceil(self.facility_count);
    }
}

impl Serialize for ResolvedResource {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ResolvedResource", 5)?;
        state.serialize_field("item_id", &self.item_id)?;
        state.serialize_field("display_name", &self.display_name)?;
        state.serialize_field("facility_kind", &self.facility_kind)?;
        state.serialize_field("facility_count", &self.facility_count)?;
        state.serialize_field("total_throughput", &self.total_throughput())?;
        state.end()
    }
}

// ============================================================================
// CSV Row Structures
// ============================================================================

/// CSV row structure for the throughput (outputs) table.
#[derive(Debug, Deserialize)]
pub struct ThroughputRow {
    /// Item name
    #[serde(rename = "Item")]
    pub item: String,
    /// Facility kind label, e.g. "Assembler"
    #[serde(rename = "Mechanism")]
    pub mechanism: String,
    /// Units produced per cycle
    #[serde(rename = "Unit Production")]
    pub unit_production: f64,
    /// Cycle duration in seconds
    #[serde(rename = "Duration")]
    pub duration: f64,
}

/// CSV row structure for the recipe (costs) table.
///
/// One row per (output, input) pair.
#[derive(Debug, Deserialize)]
pub struct CostRow {
    #[serde(rename = "Output")]
    pub output: String,
    #[serde(rename = "Input")]
    pub input: String,
    /// Units of input consumed per unit of output
    #[serde(rename = "Cost")]
    pub cost: f64,
}
