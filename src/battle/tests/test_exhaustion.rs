#[cfg(test)]
mod tests {
    use crate::battle::ai::{FirstUsableAI, NpcController};
    use crate::battle::controller::{HumanController, PlayerChoice};
    use crate::battle::state::{BattleEvent, Outcome};
    use crate::battle::tests::common::{
        assert_ok, count_events, scripted, test_engine, ScriptedSource, TestCreatureBuilder,
    };
    use crate::combatant::Combatant;
    use crate::creature::Creature;
    use pretty_assertions::assert_eq;
    use schema::AttackData;

    fn drained(name: &str) -> Creature {
        let mut creature = TestCreatureBuilder::new(name).with_initiative(10).build();
        for slot in &mut creature.attacks {
            slot.ap = 0;
        }
        creature
    }

    #[test]
    fn test_no_ap_at_turn_start_is_a_defeat_without_damage() {
        let (mut engine, recorders) = test_engine(vec![]);
        let mut combatants = [
            Combatant::player("Ash", vec![drained("Rocklet")]),
            Combatant::trainer("Ace", vec![TestCreatureBuilder::new("Mossling").build()]),
        ];
        let mut player = scripted(vec![]);
        let mut trainer = NpcController::new(FirstUsableAI);

        let report = assert_ok(engine.run(&mut combatants, [&mut player, &mut trainer]));

        assert_eq!(report.outcome, Outcome::Won { winner: 1 });
        assert_eq!(report.turns, 1);
        assert_eq!(report.xp_awarded, None);
        assert!(report.events.contains(&BattleEvent::AttacksExhausted {
            side: 0,
            creature: "Rocklet".to_string(),
        }));
        assert_eq!(
            count_events(&report, |e| matches!(
                e,
                BattleEvent::AttackUsed { .. } | BattleEvent::DamageDealt { .. }
            )),
            0
        );
        assert_eq!(combatants[0].roster[0].hp, 20);
        assert_eq!(combatants[1].roster[0].hp, 20);

        let lines = recorders.lines();
        assert!(lines.contains(&"Rocklet has used up all its attacks!".to_string()));
        assert!(lines.contains(&"Ace won!".to_string()));
        assert_eq!(recorders.ledger.borrow().record("Rocklet").losses, 1);
    }

    #[test]
    fn test_exhausted_creature_is_replaced_from_the_reserve() {
        let (mut engine, _recorders) = test_engine(vec![]);
        let mut combatants = [
            Combatant::player(
                "Ash",
                vec![drained("Rocklet"), TestCreatureBuilder::new("Sparkit").build()],
            ),
            Combatant::trainer("Ace", vec![TestCreatureBuilder::new("Mossling").with_full_hp(5).build()]),
        ];
        let mut player = HumanController::new(
            ScriptedSource::new(vec![PlayerChoice::Attack(0)])
                .with_confirmations(vec![true])
                .with_creatures(vec![1]),
        );
        let mut trainer = NpcController::new(FirstUsableAI);

        let report = assert_ok(engine.run(&mut combatants, [&mut player, &mut trainer]));

        assert_eq!(report.outcome, Outcome::Won { winner: 0 });
        assert!(report.events.contains(&BattleEvent::CreatureSwitched {
            side: 0,
            old_creature: "Rocklet".to_string(),
            new_creature: "Sparkit".to_string(),
        }));
        // the replacement used up the exhausted side's turn
        assert!(report.events.contains(&BattleEvent::TurnStarted { turn: 2, side: 1 }));
        assert_eq!(combatants[0].active_index, 1);
        assert_eq!(
            player.source().questions,
            vec!["Do you want to choose another creature?".to_string()]
        );
    }

    #[test]
    fn test_spending_the_last_ap_ends_the_battle_after_the_attack() {
        let (mut engine, _recorders) = test_engine(vec![]);
        let mut combatants = [
            Combatant::player(
                "Ash",
                vec![TestCreatureBuilder::new("Rocklet")
                    .with_initiative(10)
                    .with_attack("poke", AttackData::fixed("Poke", 1, 1))
                    .build()],
            ),
            Combatant::trainer("Ace", vec![TestCreatureBuilder::new("Mossling").build()]),
        ];
        let mut player = scripted(vec![PlayerChoice::Attack(0)]);
        let mut trainer = NpcController::new(FirstUsableAI);

        let report = assert_ok(engine.run(&mut combatants, [&mut player, &mut trainer]));

        assert_eq!(report.outcome, Outcome::Won { winner: 1 });
        assert_eq!(report.turns, 1);
        assert_eq!(combatants[1].roster[0].hp, 19);
    }
}
