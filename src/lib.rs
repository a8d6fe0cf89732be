//! # Factory Planner
//!
//! A command-line tool and library that works out how many production
//! facilities of each kind are needed to sustain a target output rate.
//!
//! Given a throughput table (how fast one facility makes an item) and a
//! recipe table (how much of each input one unit of an item consumes), the
//! planner walks the recipe tree from the target item down to raw resources
//! and reports a facility count for every item it touches.
//!
//! ## Modules
//!
//! - [`models`] - Facility kinds, throughput and recipe records, results
//! - [`data`] - CSV loading into lookup tables
//! - [`resolver`] - Recipe-tree expansion, pooling and rounding
//! - [`display`] - Output formatting
//! - [`error`] - The shared error type
//! - [`logging`] - Subscriber setup for the binary
//! - [`wasm`] - WebAssembly bindings
//!
//! ## Example Usage
//!
//! ```no_run
//! use factory_planner::{
//!     data::load_all_data,
//!     display::display_results,
//!     resolver::{compute_resource_requirements, ResolveOptions},
//! };
//! use std::path::Path;
//!
//! let (throughputs, recipes) = load_all_data(Path::new("data")).unwrap();
//!
//! // Facilities needed for 2 electronic circuits per second
//! let resources = compute_resource_requirements(
//!     "electronic circuit",
//!     2.0,
//!     &throughputs,
//!     &recipes,
//!     &ResolveOptions::default(),
//! )
//! .unwrap();
//!
//! display_results("Electronic Circuit", 2.0, &resources);
//! ```
//!
//! ## Pooling
//!
//! By default, demand for an item reached through several branches of the
//! tree is summed before rounding, so shared intermediates are not
//! overcounted. [`resolver::ResolveOptions::unpooled`] rounds every branch
//! on its own instead.

pub mod data;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod resolver;
pub mod wasm;

pub use error::{PlannerError, Result};
