// Creature Battle Schema - Shared content definitions
// This crate contains the read-only content types (species, attacks, items,
// status-effect kinds) that the engine consumes and the RON data files
// describe. The engine copies what it needs into instances and never mutates
// these definitions.

// Re-export the main types
pub use attack_data::*;
pub use effect_kind::*;
pub use item_kind::*;
pub use species_data::*;

pub mod attack_data;
pub mod effect_kind;
pub mod item_kind;
pub mod species_data;
