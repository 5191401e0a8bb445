use crate::creature::Creature;
use crate::errors::ActionError;
use schema::ItemKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Number of leading roster slots that take part in a battle.
pub const BATTLE_SLOTS: usize = 6;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatantKind {
    /// Controlled by a human through an action source.
    Player,
    /// An NPC that duels with its own roster. Its creatures cannot be caught.
    Trainer,
    /// A lone wild creature. The only kind that can be caught.
    Wild,
}

/// Item counts. Items at 0 are never offered.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: BTreeMap<ItemKind, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, item: ItemKind, count: u32) -> Self {
        self.add(item, count);
        self
    }

    pub fn count(&self, item: ItemKind) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    pub fn add(&mut self, item: ItemKind, count: u32) {
        *self.items.entry(item).or_insert(0) += count;
    }

    /// Removes one unit of `item`. Fails when none are left.
    pub fn take(&mut self, item: ItemKind) -> Result<(), ActionError> {
        match self.items.get_mut(&item) {
            Some(count) if *count > 0 => {
                *count -= 1;
                Ok(())
            }
            _ => Err(ActionError::ItemUnavailable(item)),
        }
    }

    /// Items that can currently be offered to the player, in a stable order.
    pub fn available(&self) -> Vec<(ItemKind, u32)> {
        self.items
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(item, count)| (*item, *count))
            .collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Combatant {
    pub name: String,
    pub kind: CombatantKind,

    // The full roster. Only the first `BATTLE_SLOTS` creatures take part in a battle.
    pub roster: Vec<Creature>,

    // The roster index of the creature currently fighting.
    pub active_index: usize,

    /// Whether the opposing side may flee from this combatant.
    pub escapable: bool,

    /// Scales the XP the opposing winner receives when this combatant loses.
    pub xp_multiplier: u32,

    pub inventory: Inventory,

    /// Species this combatant has captured at least once.
    pub caught_species: BTreeSet<String>,
}

impl Combatant {
    pub fn new(name: &str, kind: CombatantKind, roster: Vec<Creature>) -> Self {
        let (escapable, xp_multiplier) = match kind {
            CombatantKind::Player => (true, 1),
            CombatantKind::Trainer => (false, 2),
            CombatantKind::Wild => (true, 1),
        };

        Combatant {
            name: name.to_string(),
            kind,
            roster,
            active_index: 0,
            escapable,
            xp_multiplier,
            inventory: Inventory::new(),
            caught_species: BTreeSet::new(),
        }
    }

    pub fn player(name: &str, roster: Vec<Creature>) -> Self {
        Self::new(name, CombatantKind::Player, roster)
    }

    pub fn trainer(name: &str, roster: Vec<Creature>) -> Self {
        Self::new(name, CombatantKind::Trainer, roster)
    }

    pub fn wild(creature: Creature) -> Self {
        let name = format!("Wild {}", creature.name);
        Self::new(&name, CombatantKind::Wild, vec![creature])
    }

    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn with_escapable(mut self, escapable: bool) -> Self {
        self.escapable = escapable;
        self
    }

    pub fn with_xp_multiplier(mut self, xp_multiplier: u32) -> Self {
        self.xp_multiplier = xp_multiplier.max(1);
        self
    }

    pub fn is_player_controlled(&self) -> bool {
        self.kind == CombatantKind::Player
    }

    pub fn is_capturable(&self) -> bool {
        self.kind == CombatantKind::Wild
    }

    /// Get the currently active creature
    pub fn active(&self) -> Option<&Creature> {
        self.roster.get(self.active_index)
    }

    /// Get the currently active creature mutably
    pub fn active_mut(&mut self) -> Option<&mut Creature> {
        self.roster.get_mut(self.active_index)
    }

    /// The leading roster slots that take part in the battle.
    pub fn battle_slots(&self, limit: usize) -> &[Creature] {
        &self.roster[..self.roster.len().min(limit)]
    }

    pub fn has_living_in_battle(&self, limit: usize) -> bool {
        self.battle_slots(limit).iter().any(|c| !c.is_fainted())
    }

    /// Whether a creature other than the active one can be sent out. Creatures
    /// that used up their attacks stay on the bench, so exhaustion cannot cycle.
    pub fn has_ready_reserve(&self, limit: usize) -> bool {
        !self.valid_switches(limit).is_empty()
    }

    /// Roster indices a switch may target.
    pub fn valid_switches(&self, limit: usize) -> Vec<usize> {
        self.battle_slots(limit)
            .iter()
            .enumerate()
            .filter(|(i, c)| *i != self.active_index && !c.is_fainted() && c.has_usable_attack())
            .map(|(i, _)| i)
            .collect()
    }

    /// Moves the active index onto the first living battle slot if the
    /// current one is fainted or out of range. Returns false if none is alive.
    pub fn ensure_active(&mut self, limit: usize) -> bool {
        let active_ok = self.active_index < limit
            && self
                .roster
                .get(self.active_index)
                .is_some_and(|c| !c.is_fainted());
        if active_ok {
            return true;
        }

        match self.battle_slots(limit).iter().position(|c| !c.is_fainted()) {
            Some(index) => {
                self.active_index = index;
                true
            }
            None => false,
        }
    }

    /// Checks that `index` names a non-active battle slot able to fight.
    pub fn validate_switch(&self, index: usize, limit: usize) -> Result<(), ActionError> {
        let creature = self
            .battle_slots(limit)
            .get(index)
            .ok_or(ActionError::InvalidRosterSlot(index))?;
        if index == self.active_index {
            return Err(ActionError::AlreadyActive(index));
        }
        if creature.is_fainted() {
            return Err(ActionError::FaintedRosterSlot(index));
        }
        if !creature.has_usable_attack() {
            return Err(ActionError::ExhaustedRosterSlot(index));
        }
        Ok(())
    }

    /// Adds a creature to the end of the roster and logs its species as caught.
    pub fn add_creature(&mut self, creature: Creature) {
        self.caught_species.insert(creature.species.clone());
        self.roster.push(creature);
    }

    pub fn has_caught(&self, species: &str) -> bool {
        self.caught_species.contains(species)
    }
}
