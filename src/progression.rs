use crate::combatant::Combatant;
use crate::content::ContentProvider;
use crate::creature::{AttackSlot, Creature};
use crate::hooks::ProgressionHooks;

/// XP the winner earns from beating `loser`, before the award factor:
/// `loser.xp_multiplier * Σ(lose_xp + max(0, level - winner_level))` over the
/// loser's battle slots.
pub fn battle_xp(loser: &Combatant, winner_level: u32, roster_size: usize) -> u32 {
    let base = loser
        .battle_slots(roster_size)
        .iter()
        .map(|creature| {
            let level_bonus = creature.level().saturating_sub(winner_level);
            creature.lose_xp.saturating_add(level_bonus)
        })
        .fold(0u32, u32::saturating_add);
    base.saturating_mul(loser.xp_multiplier)
}

/// Level-up consequences looked up in a content provider.
pub struct ContentProgression<P: ContentProvider> {
    content: P,
}

impl<P: ContentProvider> ContentProgression<P> {
    pub fn new(content: P) -> Self {
        Self { content }
    }
}

impl<P: ContentProvider> ProgressionHooks for ContentProgression<P> {
    /// Learns every learnset attack up to the current level that is not known
    /// yet, while a slot is free.
    fn learn_attack(&mut self, creature: &mut Creature) -> Vec<String> {
        let species = match self.content.species(&creature.species) {
            Ok(species) => species,
            Err(error) => {
                tracing::warn!(%error, "no species data for learned attacks");
                return Vec::new();
            }
        };

        let level = creature.level();
        let mut learned = Vec::new();
        for id in species.learnable_up_to(level) {
            if creature.knows_attack(id) {
                continue;
            }
            let Ok(data) = self.content.attack(id) else {
                continue;
            };
            if creature.learn_attack(AttackSlot::new(id, data.clone())) {
                learned.push(data.name.clone());
            }
        }
        learned
    }

    fn evolve(&mut self, creature: &mut Creature) -> Option<(String, String)> {
        let species = self.content.species(&creature.species).ok()?;
        let into_id = species.evolution_at(creature.level())?.to_string();
        let into = match self.content.species(&into_id) {
            Ok(into) => into,
            Err(error) => {
                tracing::warn!(%error, "evolution target missing");
                return None;
            }
        };

        let from = creature.name.clone();
        creature.evolve_into(&into_id, into);
        Some((from, creature.name.clone()))
    }
}
