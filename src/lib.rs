// In: src/lib.rs

//! Creature Battle Engine
//!
//! A turn-based battle between two combatants, each fielding a roster of
//! creatures. The engine runs one battle to completion against pluggable
//! controllers and collaborators, and hands back a report of everything
//! that happened.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod battle;
pub mod combatant;
pub mod config;
pub mod content;
pub mod creature;
pub mod effects;
pub mod errors;
pub mod hooks;
pub mod milestones;
pub mod progression;
pub mod stats;
pub mod terminal;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `creature-battle` crate,
// making it easy for users to import the most important types directly.

// --- From the `schema` crate ---
// Re-export all read-only content definitions.
pub use schema::{
    AttackData, BallKind, BaseStats, Damage, EffectKind, EvolutionData, Infliction, ItemEffect,
    ItemKind, SpeciesData,
};

// --- From this crate's modules (`src/`) ---

// Core battle engine and its report.
pub use battle::ai::{Behavior, FirstUsableAI, NpcController, ScoringAI};
pub use battle::controller::{ActionSource, Controller, HumanController, PlayerChoice};
pub use battle::engine::BattleEngine;
pub use battle::state::{BattleEvent, BattleReport, BattleRng, Outcome};

// Core runtime types for a battle.
pub use combatant::{Combatant, CombatantKind, Inventory};
pub use creature::{AttackSlot, Creature};
pub use effects::StatusEffect;

// Content, configuration and collaborators.
pub use config::BattleConfig;
pub use content::{ContentLibrary, ContentProvider};
pub use hooks::{AudioSink, Collaborators, MessageSink, Notifier, ProgressionHooks, StatsRecorder};
pub use milestones::{Milestone, Milestones};
pub use progression::ContentProgression;
pub use stats::BattleLedger;

// Crate-specific error and result types.
pub use errors::{
    ActionError, AudioError, BattleEngineError, BattleResult, BattleStateError, ConfigError,
    ContentError, ContentResult,
};
