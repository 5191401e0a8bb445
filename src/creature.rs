use crate::effects::StatusEffect;
use schema::{AttackData, BallKind, BaseStats, EffectKind, SpeciesData};
use serde::{Deserialize, Serialize};

/// A creature never knows more than this many attacks.
pub const MAX_ATTACKS: usize = 4;

/// One known attack together with its remaining action points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackSlot {
    pub id: String,
    pub data: AttackData,
    pub ap: u8,
}

impl AttackSlot {
    /// Create a new attack slot with full AP
    pub fn new(id: &str, data: AttackData) -> Self {
        let ap = data.max_ap;
        Self {
            id: id.to_string(),
            data,
            ap,
        }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn max_ap(&self) -> u8 {
        self.data.max_ap
    }

    pub fn is_usable(&self) -> bool {
        self.ap > 0
    }

    /// Use the attack (decrease AP). Refuses when the attack is depleted.
    pub fn consume_ap(&mut self) -> bool {
        if self.ap > 0 {
            self.ap -= 1;
            true
        } else {
            false
        }
    }

    pub fn restore_ap(&mut self) {
        self.ap = self.max_ap();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub species: String, // Key for looking up species data
    pub name: String,    // Species name if no nickname
    pub base_stats: BaseStats,
    pub xp: u32,
    pub lose_xp: u32,
    pub hp: u16,
    pub full_hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub initiative: i32,
    pub attacks: Vec<AttackSlot>,
    pub effects: Vec<StatusEffect>,
    /// Set once the creature has been captured.
    pub caught_with: Option<BallKind>,
}

impl Creature {
    /// Create a creature at `level` with full hp and the given attacks
    pub fn new(species: &str, data: &SpeciesData, level: u32, attacks: Vec<AttackSlot>) -> Self {
        let mut creature = Creature {
            species: species.to_string(),
            name: data.name.clone(),
            base_stats: data.base_stats.clone(),
            xp: Self::xp_for_level(level),
            lose_xp: data.lose_xp,
            hp: 0,
            full_hp: 0,
            attack: 0,
            defense: 0,
            initiative: 0,
            attacks: attacks.into_iter().take(MAX_ATTACKS).collect(),
            effects: Vec::new(),
            caught_with: None,
        };
        creature.derive_stats();
        creature.hp = creature.full_hp;
        creature
    }

    /// Level is `floor(sqrt(xp + 1))`.
    pub fn level(&self) -> u32 {
        (self.xp as f64 + 1.0).sqrt().floor() as u32
    }

    /// Smallest XP total that reaches `level`.
    pub fn xp_for_level(level: u32) -> u32 {
        let level = level.max(1);
        level.saturating_mul(level) - 1
    }

    fn derive_stats(&mut self) {
        let level = self.level();
        let bonus = u16::try_from(level).unwrap_or(u16::MAX);
        self.full_hp = self.base_stats.hp.saturating_add(bonus).max(1);
        self.attack = self.base_stats.attack.saturating_add(bonus);
        self.defense = self.base_stats.defense.saturating_add(bonus);
        self.initiative = self
            .base_stats
            .initiative
            .saturating_add(i32::try_from(level).unwrap_or(i32::MAX));
    }

    /// Adds XP and returns how many levels were gained. Stats are derived
    /// again on a level-up and current hp grows with the max-hp delta.
    pub fn add_xp(&mut self, amount: u32) -> u32 {
        let old_level = self.level();
        self.xp = self.xp.saturating_add(amount);
        let gained = self.level() - old_level;

        if gained > 0 {
            let old_full_hp = self.full_hp;
            self.derive_stats();
            let grown = self.full_hp.saturating_sub(old_full_hp);
            self.hp = (self.hp + grown).min(self.full_hp);
        }

        gained
    }

    /// Swap species data in place, keeping xp, attacks and effects.
    /// Damage already taken carries over.
    pub fn evolve_into(&mut self, species: &str, data: &SpeciesData) {
        let missing_hp = self.full_hp - self.hp;
        self.species = species.to_string();
        self.name = data.name.clone();
        self.base_stats = data.base_stats.clone();
        self.lose_xp = data.lose_xp;
        self.derive_stats();
        self.hp = self.full_hp.saturating_sub(missing_hp).max(1);
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    /// Removes up to `amount` hp and returns what was actually removed.
    pub fn take_damage(&mut self, amount: u16) -> u16 {
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        dealt
    }

    /// Restores up to `amount` hp without exceeding `full_hp`.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let healed = amount.min(self.full_hp - self.hp);
        self.hp += healed;
        healed
    }

    pub fn set_hp(&mut self, hp: u16) {
        self.hp = hp.min(self.full_hp);
    }

    pub fn has_usable_attack(&self) -> bool {
        self.attacks.iter().any(AttackSlot::is_usable)
    }

    pub fn restore_all_ap(&mut self) {
        for slot in &mut self.attacks {
            slot.restore_ap();
        }
    }

    /// Adds an attack if a slot is free and the creature does not know it yet.
    pub fn learn_attack(&mut self, slot: AttackSlot) -> bool {
        if self.attacks.len() >= MAX_ATTACKS || self.knows_attack(&slot.id) {
            return false;
        }
        self.attacks.push(slot);
        true
    }

    pub fn knows_attack(&self, id: &str) -> bool {
        self.attacks.iter().any(|slot| slot.id == id)
    }

    // === Status effects ===

    pub fn has_effect(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|effect| effect.kind() == kind)
    }

    /// Adds a new, already attached effect. A creature never holds the same kind twice.
    pub fn inflict(&mut self, kind: EffectKind) -> bool {
        if self.has_effect(kind) {
            return false;
        }
        let mut effect = StatusEffect::new(kind);
        effect.attach();
        self.effects.push(effect);
        true
    }

    /// Detaches and drops an effect that wore off.
    pub fn remove_effect(&mut self, kind: EffectKind) -> bool {
        let before = self.effects.len();
        for effect in self.effects.iter_mut().filter(|e| e.kind() == kind) {
            effect.detach();
        }
        self.effects.retain(|effect| effect.kind() != kind);
        self.effects.len() != before
    }

    /// Attaches every held effect and returns the kinds that were newly attached.
    pub fn attach_effects(&mut self) -> Vec<EffectKind> {
        self.effects
            .iter_mut()
            .filter_map(|effect| effect.attach().then(|| effect.kind()))
            .collect()
    }

    /// Detaches every held effect and returns the kinds that were released.
    pub fn release_effects(&mut self) -> Vec<EffectKind> {
        self.effects
            .iter_mut()
            .filter_map(|effect| effect.detach().then(|| effect.kind()))
            .collect()
    }

    /// Sum of the catch bonuses of every held effect.
    pub fn effect_catch_bonus(&self) -> f64 {
        self.effects.iter().map(StatusEffect::catch_chance).sum()
    }
}
