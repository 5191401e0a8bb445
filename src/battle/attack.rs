use crate::battle::state::{split_pair, BattleEvent, BattleSession};
use crate::creature::Creature;
use crate::errors::ActionError;
use schema::{AttackData, Damage};

/// Hit points an attack removes if it connects. A pure function of the
/// attack data and both creatures.
pub fn calculate_damage(attack: &AttackData, attacker: &Creature, defender: &Creature) -> u16 {
    match attack.damage {
        Damage::Fixed(amount) => amount,
        Damage::Scaled { factor } => {
            let raw = f32::from(attacker.attack) * factor / f32::from(defender.defense.max(1));
            raw.round().max(1.0) as u16
        }
        Damage::Status => 0,
    }
}

/// Checks that the active creature of `actor` can use the attack in `slot`.
pub fn validate_attack(session: &BattleSession, actor: usize, slot: usize) -> Result<(), ActionError> {
    let attack = session
        .active(actor)
        .and_then(|creature| creature.attacks.get(slot))
        .ok_or(ActionError::InvalidAttackSlot(slot))?;

    if !attack.is_usable() {
        return Err(ActionError::NoActionPoints(attack.name().to_string()));
    }
    Ok(())
}

/// Resolves the attack in `slot` against the opposing active creature.
///
/// The AP charge is spent whether the attack hits or misses. Fainting is
/// left to the caller.
pub fn apply_attack(session: &mut BattleSession, actor: usize, slot: usize) -> Result<(), ActionError> {
    let mut events = Vec::new();
    let (attacking, defending) = split_pair(session.combatants, actor);
    let (Some(attacker), Some(defender)) = (attacking.active_mut(), defending.active_mut()) else {
        tracing::warn!(actor, "attack without both creatures on the field");
        return Ok(());
    };

    let attack_slot = attacker
        .attacks
        .get_mut(slot)
        .ok_or(ActionError::InvalidAttackSlot(slot))?;
    if !attack_slot.consume_ap() {
        return Err(ActionError::NoActionPoints(attack_slot.name().to_string()));
    }
    let data = attack_slot.data.clone();

    events.push(BattleEvent::AttackUsed {
        side: actor,
        creature: attacker.name.clone(),
        attack: data.name.clone(),
    });

    if !session.rng.roll_chance(data.accuracy, "accuracy check") {
        events.push(BattleEvent::AttackMissed {
            creature: attacker.name.clone(),
            attack: data.name.clone(),
        });
        session.emit_all(events);
        return Ok(());
    }

    if data.is_damaging() {
        let damage = calculate_damage(&data, attacker, defender);
        let dealt = defender.take_damage(damage);
        tracing::debug!(attack = %data.name, damage, dealt, "damage resolved");
        events.push(BattleEvent::DamageDealt {
            target: defender.name.clone(),
            damage: dealt,
            remaining_hp: defender.hp,
        });
    }

    if let Some(infliction) = data.inflicts {
        let applies = !defender.is_fainted()
            && !defender.has_effect(infliction.effect)
            && session.rng.roll_chance(infliction.chance, "effect infliction");
        if applies && defender.inflict(infliction.effect) {
            events.push(BattleEvent::EffectInflicted {
                target: defender.name.clone(),
                effect: infliction.effect,
            });
        }
    }

    session.emit_all(events);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::TestCreatureBuilder;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Damage::Fixed(5), 5)]
    #[case(Damage::Scaled { factor: 1.0 }, 2)]
    #[case(Damage::Scaled { factor: 0.1 }, 1)]
    #[case(Damage::Status, 0)]
    fn test_calculate_damage(#[case] damage: Damage, #[case] expected: u16) {
        let attacker = TestCreatureBuilder::new("Rocklet").with_attack_stat(10).build();
        let defender = TestCreatureBuilder::new("Mossling").with_defense(5).build();
        let data = AttackData {
            damage,
            ..AttackData::fixed("Test", 0, 5)
        };

        assert_eq!(calculate_damage(&data, &attacker, &defender), expected);
    }
}
