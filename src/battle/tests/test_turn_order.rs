#[cfg(test)]
mod tests {
    use crate::battle::ai::{FirstUsableAI, NpcController};
    use crate::battle::state::BattleEvent;
    use crate::battle::tests::common::{assert_ok, test_engine, TestCreatureBuilder};
    use crate::combatant::Combatant;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn first_attacker(report_events: &[BattleEvent]) -> Option<usize> {
        report_events.iter().find_map(|event| match event {
            BattleEvent::AttackUsed { side, .. } => Some(*side),
            _ => None,
        })
    }

    #[rstest]
    #[case(10, 5, 0)]
    #[case(5, 10, 1)]
    #[case(7, 7, 0)]
    fn test_higher_initiative_acts_first(
        #[case] first_initiative: i32,
        #[case] second_initiative: i32,
        #[case] expected: usize,
    ) {
        let (mut engine, _recorders) = test_engine(vec![]);
        let mut combatants = [
            Combatant::trainer(
                "Ace",
                vec![TestCreatureBuilder::new("Rocklet").with_initiative(first_initiative).build()],
            ),
            Combatant::trainer(
                "Bea",
                vec![TestCreatureBuilder::new("Mossling").with_initiative(second_initiative).build()],
            ),
        ];
        let mut first = NpcController::new(FirstUsableAI);
        let mut second = NpcController::new(FirstUsableAI);

        let report = assert_ok(engine.run(&mut combatants, [&mut first, &mut second]));

        assert_eq!(report.events[0], BattleEvent::BattleStarted { first_actor: expected });
        assert_eq!(first_attacker(&report.events), Some(expected));
    }

    #[test]
    fn test_sides_alternate_after_the_first_turn() {
        let (mut engine, _recorders) = test_engine(vec![]);
        let mut combatants = [
            Combatant::trainer("Ace", vec![TestCreatureBuilder::new("Rocklet").with_full_hp(12).build()]),
            Combatant::trainer(
                "Bea",
                vec![TestCreatureBuilder::new("Mossling").with_full_hp(12).with_initiative(3).build()],
            ),
        ];
        let mut first = NpcController::new(FirstUsableAI);
        let mut second = NpcController::new(FirstUsableAI);

        let report = assert_ok(engine.run(&mut combatants, [&mut first, &mut second]));

        let order: Vec<(u32, usize)> = report
            .events
            .iter()
            .filter_map(|event| match event {
                BattleEvent::TurnStarted { turn, side } => Some((*turn, *side)),
                _ => None,
            })
            .collect();
        // 12 hp, 5 damage per hit: the side acting first lands the third hit on turn 5
        assert_eq!(order, vec![(1, 1), (2, 0), (3, 1), (4, 0), (5, 1)]);
        assert_eq!(report.winner, 1);
        assert_eq!(report.turns, 5);
    }
}
