//! Workout catalog reference data.

pub mod catalog;
pub mod types;

pub use catalog::WorkoutCatalog;
pub use types::{WorkoutCategory, WorkoutDefinition, WorkoutUnit};
