use crate::battle::state::BattleRng;
use schema::EffectKind;
use serde::{Deserialize, Serialize};

/// A status effect owned by a creature.
///
/// Effects outlive a single battle: the engine attaches them when their owner
/// enters the field and detaches them when it leaves, instead of dropping
/// them. `attach`/`detach` only report a change once per transition, so the
/// cleanup side runs exactly once however many exit paths call it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    kind: EffectKind,
    #[serde(skip)]
    attached: bool,
}

/// What an effect did at the start of its owner's turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectTick {
    pub expired: bool,
    pub damage: u16,
    pub skip_turn: bool,
}

impl StatusEffect {
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            attached: false,
        }
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn catch_chance(&self) -> f64 {
        self.kind.profile().catch_chance
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Returns true if the effect was detached before this call.
    pub fn attach(&mut self) -> bool {
        let changed = !self.attached;
        self.attached = true;
        changed
    }

    /// Returns true if the effect was attached before this call.
    pub fn detach(&mut self) -> bool {
        let changed = self.attached;
        self.attached = false;
        changed
    }

    /// Round hook: removal roll, then damage, then skip roll.
    pub fn on_turn(&self, rng: &mut BattleRng) -> EffectTick {
        let profile = self.kind.profile();

        if rng.roll_chance(profile.removal_chance, "effect removal") {
            return EffectTick {
                expired: true,
                ..EffectTick::default()
            };
        }

        EffectTick {
            expired: false,
            damage: profile.damage_per_round,
            skip_turn: rng.roll_chance(profile.skip_chance, "effect skip"),
        }
    }
}
