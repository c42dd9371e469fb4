// Objectmon Schema - Shared type definitions
// This crate contains the core enums and data structs shared between the
// main objectmon crate and its static data catalogs.

// Re-export the main types
pub use move_data::*;
pub use moves::*;
pub use objectmon_types::*;
pub use species::*;
pub use species_data::*;

pub mod move_data;
pub mod moves;
pub mod objectmon_types;
pub mod species;
pub mod species_data;
