//! Projection parameters, validation, and file loading

mod data;
mod validate;
pub mod loader;

pub use data::{EventKind, Extension, ProjectionParameters, Scenario, ScheduledEvent};
pub use loader::{load_parameters_json, load_scenarios, load_scenarios_from_reader};
pub use validate::{check_years, validate, InputBounds};
