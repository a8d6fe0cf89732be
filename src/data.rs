//! Data loading functionality for the factory planner.
//!
//! This module builds the two lookup tables the resolver works from:
//! the throughput table (what each facility produces per second) and the
//! recipe table (what each item consumes). Both are normally read from CSV
//! files in the `data/` directory, `outputs.csv` and `costs.csv`.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{PlannerError, Result};
use crate::models::{normalize_name, CostRow, RecipeRecord, ThroughputRecord, ThroughputRow};

/// File name of the throughput table inside a data directory.
pub const THROUGHPUT_FILE: &str = "outputs.csv";
/// File name of the recipe table inside a data directory.
pub const COSTS_FILE: &str = "costs.csv";

/// Lookup of every known item to its [`ThroughputRecord`].
///
/// This table is the superset of all items: raw resources appear here
/// with their extraction facility even though they have no recipe.
#[derive(Debug, Clone, Default)]
pub struct ThroughputTable {
    records: HashMap<String, ThroughputRecord>,
}

impl ThroughputTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, returning the one it replaced, if any.
    pub fn insert(&mut self, record: ThroughputRecord) -> Option<ThroughputRecord> {
        self.records.insert(record.item_id.clone(), record)
    }

    /// Looks up an item by name (case-insensitive).
    pub fn lookup(&self, item_id: &str) -> Result<&ThroughputRecord> {
        let key = normalize_name(item_id);
        self.records
            .get(&key)
            .ok_or(PlannerError::UnknownItem(key))
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.records.contains_key(&normalize_name(item_id))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThroughputRecord> {
        self.records.values()
    }
}

/// Lookup of items that have inputs to their [`RecipeRecord`].
#[derive(Debug, Clone, Default)]
pub struct RecipeTable {
    recipes: HashMap<String, RecipeRecord>,
}

impl RecipeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that one unit of `output` consumes `amount` units of `input`.
    ///
    /// Fails with [`PlannerError::MissingInputDefinition`] when `input` is
    /// not in `throughputs`.
    pub fn add_input(
        &mut self,
        output: &str,
        input: &str,
        amount: f64,
        throughputs: &ThroughputTable,
    ) -> Result<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(PlannerError::InvalidAmount {
                output: output.trim().to_string(),
                input: input.trim().to_string(),
                amount,
            });
        }
        if !throughputs.contains(input) {
            return Err(PlannerError::MissingInputDefinition {
                output: normalize_name(output),
                input: normalize_name(input),
            });
        }

        self.recipes
            .entry(normalize_name(output))
            .or_insert_with(|| RecipeRecord::new(output))
            .set_input(input, amount);
        Ok(())
    }

    /// Inserts a complete record without checking its inputs.
    ///
    /// Call [`RecipeTable::validate`] afterwards when the inputs come from
    /// an untrusted source.
    pub fn insert(&mut self, record: RecipeRecord) -> Option<RecipeRecord> {
        self.recipes.insert(record.item_id.clone(), record)
    }

    /// Checks that every referenced input is known to `throughputs`.
    pub fn validate(&self, throughputs: &ThroughputTable) -> Result<()> {
        for recipe in self.recipes.values() {
            for (input, _) in &recipe.inputs {
                if !throughputs.contains(input) {
                    return Err(PlannerError::MissingInputDefinition {
                        output: recipe.item_id.clone(),
                        input: input.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn has_recipe(&self, item_id: &str) -> bool {
        self.recipes.contains_key(&normalize_name(item_id))
    }

    pub fn recipe_for(&self, item_id: &str) -> Option<&RecipeRecord> {
        self.recipes.get(&normalize_name(item_id))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

fn csv_error(file: &Path, source: csv::Error) -> PlannerError {
    PlannerError::Csv {
        file: file.to_path_buf(),
        source,
    }
}

fn row_error(file: &Path, line: u64, source: PlannerError) -> PlannerError {
    PlannerError::InvalidRow {
        file: file.to_path_buf(),
        line,
        source: Box::new(source),
    }
}

/// Visits each data row with its line number, the header being line 1.
fn for_each_row<R, T, F>(reader: R, origin: &Path, mut visit: F) -> Result<()>
where
    R: Read,
    T: DeserializeOwned,
    F: FnMut(T) -> Result<()>,
{
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers().map_err(|e| csv_error(origin, e))?.clone();

    for result in rdr.records() {
        let record = result.map_err(|e| csv_error(origin, e))?;
        let line = record.position().map_or(0, |p| p.line());
        let row: T = record
            .deserialize(Some(&headers))
            .map_err(|e| csv_error(origin, e))?;
        visit(row).map_err(|e| row_error(origin, line, e))?;
    }
    Ok(())
}

/// Loads throughput data from any CSV source.
///
/// # Arguments
///
/// * `reader` - CSV content
/// * `origin` - Name of the source, used in error messages
///
/// # CSV Format
///
/// Expected columns: `Item, Mechanism, Unit Production, Duration`
pub fn load_throughputs_from_reader<R: Read>(reader: R, origin: &Path) -> Result<ThroughputTable> {
    let mut table = ThroughputTable::new();
    for_each_row(reader, origin, |row: ThroughputRow| {
        let record = ThroughputRecord::new(
            &row.item,
            row.mechanism.parse()?,
            row.unit_production,
            row.duration,
        )?;
        debug!(
            item = %record.display_name,
            mechanism = %record.facility_kind,
            throughput = record.unit_throughput(),
            "loaded throughput"
        );
        if let Some(previous) = table.insert(record) {
            warn!(item = %previous.display_name, "duplicate throughput row, keeping the last one");
        }
        Ok(())
    })?;
    Ok(table)
}

/// Loads recipe data from any CSV source, validating inputs against
/// `throughputs`.
///
/// # CSV Format
///
/// Expected columns: `Output, Input, Cost`, one row per input of an item.
pub fn load_recipes_from_reader<R: Read>(
    reader: R,
    origin: &Path,
    throughputs: &ThroughputTable,
) -> Result<RecipeTable> {
    let mut table = RecipeTable::new();
    for_each_row(reader, origin, |row: CostRow| {
        table.add_input(&row.output, &row.input, row.cost, throughputs)
    })?;
    Ok(table)
}

/// Loads the throughput table from a CSV file.
pub fn load_throughputs(path: &Path) -> Result<ThroughputTable> {
    let file = File::open(path)?;
    load_throughputs_from_reader(file, path)
}

/// Loads the recipe table from a CSV file.
pub fn load_recipes(path: &Path, throughputs: &ThroughputTable) -> Result<RecipeTable> {
    let file = File::open(path)?;
    load_recipes_from_reader(file, path, throughputs)
}

/// Loads both tables from explicit file paths.
pub fn load_tables(outputs: &Path, costs: &Path) -> Result<(ThroughputTable, RecipeTable)> {
    let throughputs = load_throughputs(outputs)?;
    let recipes = load_recipes(costs, &throughputs)?;
    info!(
        items = throughputs.len(),
        recipes = recipes.len(),
        "loaded production tables"
    );
    Ok((throughputs, recipes))
}

/// Loads both tables from `outputs.csv` and `costs.csv` in `data_dir`.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use factory_planner::data::load_all_data;
///
/// let (throughputs, recipes) = load_all_data(Path::new("data")).unwrap();
/// println!("Loaded {} items, {} recipes", throughputs.len(), recipes.len());
/// ```
pub fn load_all_data(data_dir: &Path) -> Result<(ThroughputTable, RecipeTable)> {
    load_tables(&data_dir.join(THROUGHPUT_FILE), &data_dir.join(COSTS_FILE))
}
