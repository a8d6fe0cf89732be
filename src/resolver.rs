//! Recipe-tree resolution for the factory planner.
//!
//! Starting from a target item and a desired rate, the resolver walks the
//! recipe table and converts every required rate into a facility count.
//! Two strategies are supported:
//!
//! 1. **Pooled** (default): demands for the same item coming from different
//!    branches are summed first and rounded once at the end.
//! 2. **Unpooled**: every visit is rounded on its own and reported as a
//!    separate entry, which can overcount shared resources.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::data::{RecipeTable, ThroughputTable};
use crate::error::{PlannerError, Result};
use crate::models::{normalize_name, ResolvedResource};

/// Tolerance above an integer that still counts as that integer.
pub const FUDGE_FACTOR: f64 = 0.001;

/// Default limit on recipe nesting before a tree is treated as cyclic.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Rounds up to the next integer, unless `number` is within
/// [`FUDGE_FACTOR`] above its floor.
///
/// Rates carried through several recipe levels pick up floating-point
/// noise, so `4.00000000003` means four facilities, not five.
///
/// # Example
///
/// ```
/// use factory_planner::resolver::fudged_ceil;
///
/// assert_eq!(fudged_ceil(4.0), 4.0);
/// assert_eq!(fudged_ceil(4.0005), 4.0);
/// assert_eq!(fudged_ceil(4.002), 5.0);
/// ```
pub fn fudged_ceil(number: f64) -> f64 {
    let floor = number.floor();
    if number - floor < FUDGE_FACTOR {
        floor
    } else {
        number.ceil()
    }
}

/// Options controlling a resolution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Merge same-item demands before rounding
    pub pool: bool,
    /// Deepest recipe nesting accepted; `None` disables the guard
    pub max_depth: Option<usize>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            pool: true,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl ResolveOptions {
    pub fn unpooled() -> Self {
        Self {
            pool: false,
            ..Self::default()
        }
    }
}

/// Accepts a finite, non-negative rate; `-0.0` comes back as `0.0`.
fn check_rate(rate: f64) -> Result<f64> {
    if rate.is_finite() && rate >= 0.0 {
        Ok(rate + 0.0)
    } else {
        Err(PlannerError::InvalidRate(rate))
    }
}

/// Expands `item_id` into one entry per visited item.
///
/// The tree is walked depth-first with an explicit worklist: an item is
/// emitted before its inputs, and inputs follow recipe order. Each input is
/// requested at `parent_rate * amount_per_unit`.
///
/// With `options.pool` set, counts are left fractional for
/// [`pool_resources`]; otherwise each count is rounded with
/// [`fudged_ceil`] as it is emitted.
pub fn expand(
    item_id: &str,
    desired_rate: f64,
    throughputs: &ThroughputTable,
    recipes: &RecipeTable,
    options: &ResolveOptions,
) -> Result<Vec<ResolvedResource>> {
    let desired_rate = check_rate(desired_rate)?;

    let mut resources = Vec::new();
    let mut worklist = vec![(normalize_name(item_id), desired_rate, 0usize)];

    while let Some((id, rate, depth)) = worklist.pop() {
        if let Some(max_depth) = options.max_depth {
            if depth > max_depth {
                return Err(PlannerError::DepthExceeded { item: id, max_depth });
            }
        }

        let record = throughputs.lookup(&id)?;
        let mut facility_count = record.facility_count_for(rate);
        if !options.pool {
            facility_count = fudged_ceil(facility_count);
        }
        debug!(item = %id, rate, facility_count, depth, "resolved item");
        resources.push(ResolvedResource::new(record, facility_count));

        if let Some(recipe) = recipes.recipe_for(&id) {
            // Reversed so the first input is popped first.
            for (input_id, amount) in recipe.inputs.iter().rev() {
                worklist.push((input_id.clone(), rate * amount, depth + 1));
            }
        }
    }

    Ok(resources)
}

/// Merges entries for the same item and rounds each total once.
///
/// Entries keep the order in which each item was first seen.
pub fn pool_resources(resources: Vec<ResolvedResource>) -> Result<Vec<ResolvedResource>> {
    let mut pooled: Vec<ResolvedResource> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for resource in resources {
        match index.get(&resource.item_id) {
            Some(&i) => pooled[i].absorb(&resource)?,
            None => {
                index.insert(resource.item_id.clone(), pooled.len());
                pooled.push(resource);
            }
        }
    }

    for resource in &mut pooled {
        resource.round_up();
    }
    Ok(pooled)
}

/// Computes the facilities needed to produce `item_id` at `desired_rate`
/// units per second.
///
/// # Arguments
///
/// * `item_id` - Target item name (case-insensitive)
/// * `desired_rate` - Units per second; must be finite and non-negative
/// * `throughputs` - Per-facility production rates of every known item
/// * `recipes` - Inputs of every item that has any
/// * `options` - Pooling and depth-guard settings
///
/// # Returns
///
/// One entry per item when pooling, one per visit otherwise. Callers must
/// not rely on the order. Fails with [`PlannerError::UnknownItem`] for an
/// unknown target and [`PlannerError::InvalidRate`] for a negative rate.
///
/// # Example
///
/// ```
/// use factory_planner::data::{RecipeTable, ThroughputTable};
/// use factory_planner::models::{FacilityKind, ThroughputRecord};
/// use factory_planner::resolver::{compute_resource_requirements, ResolveOptions};
///
/// let mut throughputs = ThroughputTable::new();
/// throughputs.insert(ThroughputRecord::new("Gear", FacilityKind::Mine, 2.0, 1.0).unwrap());
/// throughputs.insert(ThroughputRecord::new("Plate", FacilityKind::Mine, 1.0, 1.0).unwrap());
/// let mut recipes = RecipeTable::new();
/// recipes.add_input("Gear", "Plate", 2.0, &throughputs).unwrap();
///
/// let result = compute_resource_requirements(
///     "gear", 1.0, &throughputs, &recipes, &ResolveOptions::default(),
/// ).unwrap();
/// assert_eq!(result.len(), 2);
/// ```
pub fn compute_resource_requirements(
    item_id: &str,
    desired_rate: f64,
    throughputs: &ThroughputTable,
    recipes: &RecipeTable,
    options: &ResolveOptions,
) -> Result<Vec<ResolvedResource>> {
    let desired_rate = check_rate(desired_rate)?;
    let target = throughputs.lookup(item_id)?;

    let visits = expand(&target.item_id, desired_rate, throughputs, recipes, options)?;
    let visit_count = visits.len();
    let resources = if options.pool {
        pool_resources(visits)?
    } else {
        visits
    };

    info!(
        item = %target.display_name,
        rate = desired_rate,
        pooled = options.pool,
        visits = visit_count,
        entries = resources.len(),
        "computed resource requirements"
    );
    Ok(resources)
}
