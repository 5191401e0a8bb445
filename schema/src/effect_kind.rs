use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString, IntoStaticStr};

/// Status effects an attack can leave on its target.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
    EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum EffectKind {
    Paralysis,
    Sleep,
    Burning,
    Poison,
    Confusion,
    Freezing,
}

/// Per-kind numbers that drive an effect's round hook and its catch bonus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectProfile {
    /// Added to the catch weight while the effect sits on a wild target.
    pub catch_chance: f64,
    /// Hit points lost at the start of every affected turn.
    pub damage_per_round: u16,
    /// Percent chance the affected unit loses its turn.
    pub skip_chance: u8,
    /// Percent chance the effect wears off at the start of a turn.
    pub removal_chance: u8,
}

impl EffectKind {
    pub fn profile(self) -> EffectProfile {
        use EffectKind::*;

        let (catch_chance, damage_per_round, skip_chance, removal_chance) = match self {
            Paralysis => (1.0, 0, 50, 25),
            Sleep => (2.0, 0, 100, 33),
            Burning => (1.0, 2, 0, 20),
            Poison => (1.0, 1, 0, 15),
            Confusion => (0.0, 0, 33, 33),
            Freezing => (3.0, 0, 100, 25),
        };

        EffectProfile {
            catch_chance,
            damage_per_round,
            skip_chance,
            removal_chance,
        }
    }

    /// Verb phrase used when the effect takes hold ("X is burning!").
    pub fn applied_phrase(self) -> &'static str {
        match self {
            EffectKind::Paralysis => "is paralyzed",
            EffectKind::Sleep => "fell asleep",
            EffectKind::Burning => "is burning",
            EffectKind::Poison => "is poisoned",
            EffectKind::Confusion => "is confused",
            EffectKind::Freezing => "is frozen",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{}", name)
    }
}
