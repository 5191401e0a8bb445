use crate::battle::catch::CatchError;
use crate::ItemKind;
use serde::{Deserialize, Serialize};

/// Main error type for the creature battle engine
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BattleEngineError {
    /// Error related to content lookup or loading
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
    /// Error related to configuration loading
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// Error related to invalid battle state
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
    /// Error related to invalid player actions
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
}

/// Errors related to content definitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("Species not found: {0}")]
    SpeciesNotFound(String),
    #[error("Attack not found: {0}")]
    AttackNotFound(String),
    #[error("Species {0} has no attacks")]
    NoAttacks(String),
    #[error("Malformed content data: {0}")]
    MalformedData(String),
    #[error("Could not read content file: {0}")]
    Io(String),
}

/// Errors related to battle configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Malformed config: {0}")]
    MalformedData(String),
    #[error("Could not read config file: {0}")]
    Io(String),
}

/// Errors related to battle state validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BattleStateError {
    /// A combatant entered the battle without a living unit in its battle slots
    #[error("{0} has no creature able to fight")]
    NoLivingUnit(String),
}

/// Errors related to a single action. The engine reports these to the player
/// and re-prompts instead of aborting the battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ActionError {
    #[error("Invalid attack slot: {0}")]
    InvalidAttackSlot(usize),
    #[error("{0} has no AP left")]
    NoActionPoints(String),
    #[error("Invalid roster slot: {0}")]
    InvalidRosterSlot(usize),
    #[error("Creature in slot {0} is not able to fight")]
    FaintedRosterSlot(usize),
    #[error("Creature in slot {0} has used up all its attacks")]
    ExhaustedRosterSlot(usize),
    #[error("Creature in slot {0} is already fighting")]
    AlreadyActive(usize),
    #[error("No {0} left")]
    ItemUnavailable(ItemKind),
    #[error(transparent)]
    Catch(#[from] CatchError),
    #[error("You can't run away from this fight!")]
    EscapeForbidden,
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using ContentError
pub type ContentResult<T> = Result<T, ContentError>;

/// Reported by an audio sink. The engine logs it and carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Audio playback failed: {0}")]
pub struct AudioError(pub String);
