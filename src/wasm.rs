//! WebAssembly bindings for the factory planner.
//!
//! This module provides JavaScript-accessible functions over the tables
//! embedded from `data/`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::data::{
    load_recipes_from_reader, load_throughputs_from_reader, RecipeTable, ThroughputTable,
    COSTS_FILE, THROUGHPUT_FILE,
};
use crate::error::Result;
use crate::models::{FacilityKind, ResolvedResource};
use crate::resolver::{compute_resource_requirements, ResolveOptions, DEFAULT_MAX_DEPTH};

const EMBEDDED_OUTPUTS: &str = include_str!("../data/outputs.csv");
const EMBEDDED_COSTS: &str = include_str!("../data/costs.csv");

/// Reports a failure on the browser console, or through `tracing` natively.
fn report(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    tracing::warn!("{}", message);
}

fn default_pool() -> bool {
    true
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// JavaScript-friendly input for a computation.
#[derive(Debug, Clone, Deserialize)]
pub struct JsComputeInput {
    pub product: String,
    pub rate: f64,
    #[serde(default = "default_pool")]
    pub pool: bool,
    /// 0 disables the depth guard
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl JsComputeInput {
    fn options(&self) -> ResolveOptions {
        ResolveOptions {
            pool: self.pool,
            max_depth: (self.max_depth > 0).then_some(self.max_depth),
        }
    }
}

/// JavaScript-friendly computation result.
#[derive(Debug, Clone, Serialize)]
pub struct JsComputeResult {
    pub success: bool,
    pub error: Option<String>,
    pub product: String,
    pub rate: f64,
    pub resources: Vec<ResolvedResource>,
}

impl JsComputeResult {
    fn failure(product: String, rate: f64, message: String) -> Self {
        report(&message);
        Self {
            success: false,
            error: Some(message),
            product,
            rate,
            resources: vec![],
        }
    }
}

/// Entry returned by [`get_available_items`].
#[derive(Debug, Clone, Serialize)]
pub struct JsItemInfo {
    pub name: String,
    pub facility_kind: FacilityKind,
    pub unit_throughput: f64,
    pub has_recipe: bool,
}

/// Parses the CSV data compiled into the binary.
fn embedded_tables() -> Result<(ThroughputTable, RecipeTable)> {
    let throughputs =
        load_throughputs_from_reader(EMBEDDED_OUTPUTS.as_bytes(), Path::new(THROUGHPUT_FILE))?;
    let recipes =
        load_recipes_from_reader(EMBEDDED_COSTS.as_bytes(), Path::new(COSTS_FILE), &throughputs)?;
    Ok((throughputs, recipes))
}

/// Computes facility requirements for the product described in `input_json`.
///
/// Takes a JSON string input and returns a JSON string result.
#[wasm_bindgen]
pub fn compute(input_json: &str) -> String {
    serde_json::to_string(&compute_result(input_json)).unwrap_or_default()
}

fn compute_result(input_json: &str) -> JsComputeResult {
    let input: JsComputeInput = match serde_json::from_str(input_json) {
        Ok(i) => i,
        Err(e) => return JsComputeResult::failure(String::new(), 0.0, format!("Invalid input: {}", e)),
    };

    let (throughputs, recipes) = match embedded_tables() {
        Ok(tables) => tables,
        Err(e) => return JsComputeResult::failure(input.product, input.rate, e.to_string()),
    };

    match compute_resource_requirements(
        &input.product,
        input.rate,
        &throughputs,
        &recipes,
        &input.options(),
    ) {
        Ok(resources) => JsComputeResult {
            success: true,
            error: None,
            product: input.product,
            rate: input.rate,
            resources,
        },
        Err(e) => JsComputeResult::failure(input.product, input.rate, e.to_string()),
    }
}

/// Get the version of the planner.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get the list of known items, sorted by name.
/// Returns a JSON array.
#[wasm_bindgen]
pub fn get_available_items() -> String {
    let (throughputs, recipes) = match embedded_tables() {
        Ok(tables) => tables,
        Err(e) => {
            report(&e.to_string());
            return "[]".to_string();
        }
    };

    let mut items: Vec<JsItemInfo> = throughputs
        .iter()
        .map(|record| JsItemInfo {
            name: record.display_name.clone(),
            facility_kind: record.facility_kind,
            unit_throughput: record.unit_throughput(),
            has_recipe: recipes.has_recipe(&record.item_id),
        })
        .collect();
    items.sort_by(|a, b| a.name.cmp(&b.name));

    serde_json::to_string(&items).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_tables_parse() {
        let (throughputs, recipes) = embedded_tables().unwrap();
        assert!(throughputs.contains("iron plate"));
        assert!(recipes.has_recipe("electronic circuit"));
    }

    #[test]
    fn compute_reports_pooled_resources() {
        let result = compute_result(r#"{"product": "Iron Gear Wheel", "rate": 1.0}"#);
        assert!(result.success, "{:?}", result.error);
        let names: Vec<&str> = result
            .resources
            .iter()
            .map(|r| r.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["Iron Gear Wheel", "Iron Plate", "Iron Ore"]);
    }

    #[test]
    fn compute_reports_unknown_items() {
        let result = compute_result(r#"{"product": "Rocket Fuel", "rate": 1.0}"#);
        assert!(!result.success);
        assert!(result.resources.is_empty());
        assert_eq!(result.error.as_deref(), Some("unknown item 'rocket fuel'"));
    }

    #[test]
    fn compute_rejects_malformed_json() {
        let result = compute_result("not json");
        assert!(!result.success);
        assert!(result.error.unwrap().starts_with("Invalid input"));
    }

    #[test]
    fn available_items_are_sorted() {
        let items: Vec<serde_json::Value> =
            serde_json::from_str(&get_available_items()).unwrap();
        let names: Vec<&str> = items.iter().map(|i| i["name"].as_str().unwrap()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(items[0]["name"], "Advanced Circuit");
        assert_eq!(items[0]["facility_kind"], "Assembler");
    }
}
