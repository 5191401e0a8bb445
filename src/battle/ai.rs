//! A module for defining AI behaviors for NPC and wild combatants.

use crate::battle::attack::calculate_damage;
use crate::battle::controller::{Controller, PlayerChoice};
use crate::combatant::Combatant;
use crate::creature::{AttackSlot, Creature};
use ordered_float::OrderedFloat;

/// A trait for any system that can decide on a battle action.
/// This provides a common interface for different AI difficulties or strategies.
pub trait Behavior {
    /// Inspects both sides and decides on the next action.
    fn decide_action(&self, me: &Combatant, opponent: &Combatant) -> PlayerChoice;

    /// Picks the creature to send out after the active one is defeated.
    fn decide_replacement(&self, me: &Combatant, roster_size: usize) -> Option<usize>;
}

/// Scores every usable attack and picks the best one. Ties go to the lowest slot.
pub struct ScoringAI;

impl ScoringAI {
    pub fn new() -> Self {
        Self
    }

    /// The core scoring logic. Assigns a floating-point value to an attack.
    fn score_attack(&self, slot: &AttackSlot, attacker: &Creature, defender: &Creature) -> f64 {
        let data = &slot.data;
        let hit_chance = f64::from(data.accuracy.min(100)) / 100.0;

        // --- Step 1: Expected damage ---
        let damage = f64::from(calculate_damage(data, attacker, defender));
        let mut score = damage * hit_chance;

        // Finishing the target off beats everything else.
        if damage > 0.0 && damage >= f64::from(defender.hp) {
            score += 100.0 * hit_chance;
        }

        // --- Step 2: Utility of the effect it may inflict ---
        if let Some(infliction) = data.inflicts {
            if !defender.has_effect(infliction.effect) {
                let profile = infliction.effect.profile();
                let per_round = f64::from(profile.damage_per_round)
                    + 5.0 * f64::from(profile.skip_chance) / 100.0;
                score += per_round * f64::from(infliction.chance) / 100.0 * hit_chance;
            }
        }

        score
    }
}

impl Default for ScoringAI {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for ScoringAI {
    fn decide_action(&self, me: &Combatant, opponent: &Combatant) -> PlayerChoice {
        let (Some(attacker), Some(defender)) = (me.active(), opponent.active()) else {
            return PlayerChoice::Attack(0);
        };

        attacker
            .attacks
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_usable())
            .map(|(index, slot)| (index, OrderedFloat(self.score_attack(slot, attacker, defender))))
            // Reverse the index so equal scores favour the lowest slot.
            .max_by(|(a_index, a_score), (b_index, b_score)| {
                a_score.cmp(b_score).then(b_index.cmp(a_index))
            })
            .map(|(index, _)| PlayerChoice::Attack(index))
            .unwrap_or(PlayerChoice::Attack(0))
    }

    fn decide_replacement(&self, me: &Combatant, roster_size: usize) -> Option<usize> {
        me.valid_switches(roster_size)
            .into_iter()
            .max_by(|a, b| {
                let hp = |index: &usize| me.roster[*index].hp;
                hp(a).cmp(&hp(b)).then(b.cmp(a))
            })
    }
}

/// Always uses the first attack with AP left and sends out the first living
/// reserve. Fully deterministic.
pub struct FirstUsableAI;

impl Behavior for FirstUsableAI {
    fn decide_action(&self, me: &Combatant, _opponent: &Combatant) -> PlayerChoice {
        let slot = me
            .active()
            .and_then(|creature| creature.attacks.iter().position(AttackSlot::is_usable))
            .unwrap_or(0);
        PlayerChoice::Attack(slot)
    }

    fn decide_replacement(&self, me: &Combatant, roster_size: usize) -> Option<usize> {
        me.valid_switches(roster_size).into_iter().next()
    }
}

/// Controller for any side without a human behind it. Resolves synchronously.
pub struct NpcController<B: Behavior> {
    behavior: B,
}

impl<B: Behavior> NpcController<B> {
    pub fn new(behavior: B) -> Self {
        Self { behavior }
    }
}

impl<B: Behavior> Controller for NpcController<B> {
    fn select_action(&mut self, me: &Combatant, opponent: &Combatant) -> PlayerChoice {
        self.behavior.decide_action(me, opponent)
    }

    fn select_replacement(&mut self, me: &Combatant, roster_size: usize) -> Option<usize> {
        self.behavior.decide_replacement(me, roster_size)
    }

    fn confirm_escape(&mut self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::TestCreatureBuilder;
    use pretty_assertions::assert_eq;
    use schema::{AttackData, EffectKind, Infliction};

    fn trainer(creature: Creature) -> Combatant {
        Combatant::trainer("Ace", vec![creature])
    }

    #[test]
    fn test_scoring_ai_prefers_higher_damage() {
        let me = trainer(
            TestCreatureBuilder::new("Rocklet")
                .with_attack("poke", AttackData::fixed("Poke", 2, 5))
                .with_attack("smash", AttackData::fixed("Smash", 6, 5))
                .build(),
        );
        let opponent = trainer(TestCreatureBuilder::new("Mossling").with_full_hp(50).build());

        assert_eq!(ScoringAI::new().decide_action(&me, &opponent), PlayerChoice::Attack(1));
    }

    #[test]
    fn test_scoring_ai_skips_depleted_attacks_and_breaks_ties_low() {
        let mut creature = TestCreatureBuilder::new("Rocklet")
            .with_attack("a", AttackData::fixed("A", 3, 5))
            .with_attack("b", AttackData::fixed("B", 3, 5))
            .with_attack("c", AttackData::fixed("C", 3, 5))
            .build();
        creature.attacks[0].ap = 0;
        let me = trainer(creature);
        let opponent = trainer(TestCreatureBuilder::new("Mossling").with_full_hp(50).build());

        assert_eq!(ScoringAI::new().decide_action(&me, &opponent), PlayerChoice::Attack(1));
    }

    #[test]
    fn test_scoring_ai_values_effects_on_clean_targets_only() {
        let spore = AttackData {
            inflicts: Some(Infliction {
                effect: EffectKind::Sleep,
                chance: 100,
            }),
            ..AttackData::fixed("Spore", 0, 5)
        };
        let me = trainer(
            TestCreatureBuilder::new("Mossling")
                .with_attack("nudge", AttackData::fixed("Nudge", 1, 5))
                .with_attack("spore", spore)
                .build(),
        );

        let clean = trainer(TestCreatureBuilder::new("Rocklet").with_full_hp(50).build());
        assert_eq!(ScoringAI::new().decide_action(&me, &clean), PlayerChoice::Attack(1));

        let asleep = trainer(
            TestCreatureBuilder::new("Rocklet")
                .with_full_hp(50)
                .with_effect(EffectKind::Sleep)
                .build(),
        );
        assert_eq!(ScoringAI::new().decide_action(&me, &asleep), PlayerChoice::Attack(0));
    }

    #[test]
    fn test_replacement_picks_most_hp() {
        let me = Combatant::trainer(
            "Ace",
            vec![
                TestCreatureBuilder::new("A").with_hp(0).build(),
                TestCreatureBuilder::new("B").with_full_hp(30).with_hp(10).build(),
                TestCreatureBuilder::new("C").with_full_hp(30).with_hp(25).build(),
            ],
        );

        assert_eq!(ScoringAI::new().decide_replacement(&me, 6), Some(2));
        assert_eq!(FirstUsableAI.decide_replacement(&me, 6), Some(1));
    }
}
