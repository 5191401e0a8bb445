#[cfg(test)]
mod tests {
    use crate::battle::ai::{FirstUsableAI, NpcController};
    use crate::battle::controller::PlayerChoice;
    use crate::battle::state::{BattleEvent, BattleReport, Outcome};
    use crate::battle::tests::common::{assert_ok, scripted, test_engine, TestCreatureBuilder};
    use crate::combatant::{Combatant, Inventory};
    use crate::creature::Creature;
    use crate::errors::ActionError;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{AttackData, ItemKind};

    fn run_with_item(creature: Creature, inventory: Inventory, item: ItemKind) -> (BattleReport, [Combatant; 2], Vec<String>) {
        let (mut engine, recorders) = test_engine(vec![]);
        let mut combatants = [
            Combatant::player("Ash", vec![creature]).with_inventory(inventory),
            Combatant::trainer("Ace", vec![TestCreatureBuilder::new("Mossling").with_full_hp(5).build()]),
        ];
        let mut player = scripted(vec![PlayerChoice::UseItem(item), PlayerChoice::Attack(0)]);
        let mut trainer = NpcController::new(FirstUsableAI);

        let report = assert_ok(engine.run(&mut combatants, [&mut player, &mut trainer]));
        (report, combatants, recorders.lines())
    }

    #[rstest]
    #[case(ItemKind::HealingPotion, 10, 5, 15)]
    #[case(ItemKind::SuperPotion, 10, 10, 20)]
    #[case(ItemKind::SuperPotion, 18, 2, 20)]
    fn test_potions_heal_up_to_full_hp(
        #[case] potion: ItemKind,
        #[case] hp: u16,
        #[case] expected_amount: u16,
        #[case] expected_hp: u16,
    ) {
        let creature = TestCreatureBuilder::new("Rocklet")
            .with_full_hp(20)
            .with_hp(hp)
            .with_initiative(10)
            .build();

        let (report, combatants, _) = run_with_item(creature, Inventory::new().with(potion, 1), potion);

        assert!(report.events.contains(&BattleEvent::ItemUsed { side: 0, item: potion }));
        assert!(report.events.contains(&BattleEvent::Healed {
            target: "Rocklet".to_string(),
            amount: expected_amount,
            new_hp: expected_hp,
        }));
        assert_eq!(combatants[0].inventory.count(potion), 0);
        assert_eq!(report.outcome, Outcome::Won { winner: 0 });
    }

    #[test]
    fn test_potion_use_ends_the_turn() {
        let creature = TestCreatureBuilder::new("Rocklet").with_hp(10).with_initiative(10).build();

        let (report, _, lines) = run_with_item(
            creature,
            Inventory::new().with(ItemKind::HealingPotion, 2),
            ItemKind::HealingPotion,
        );

        assert_eq!(report.turns, 3);
        assert!(lines.contains(&"Ash used a Healing Potion!".to_string()));
        assert!(lines.contains(&"Rocklet recovered 5 HP!".to_string()));
    }

    #[test]
    fn test_ap_potion_restores_every_attack_to_max() {
        let mut creature = TestCreatureBuilder::new("Rocklet")
            .with_initiative(10)
            .with_attack("tackle", AttackData::fixed("Tackle", 5, 3))
            .with_attack("poke", AttackData::fixed("Poke", 1, 4))
            .build();
        creature.attacks[0].ap = 1;
        creature.attacks[1].ap = 0;

        let (report, combatants, lines) = run_with_item(
            creature,
            Inventory::new().with(ItemKind::ApPotion, 1),
            ItemKind::ApPotion,
        );

        assert!(report.events.contains(&BattleEvent::ApRestored {
            target: "Rocklet".to_string()
        }));
        let attacks = &combatants[0].roster[0].attacks;
        assert_eq!(attacks[0].ap, 2, "restored to 3, then one tackle");
        assert_eq!(attacks[1].ap, 4);
        assert!(lines.contains(&"Rocklet's attacks were restored!".to_string()));
    }

    #[test]
    fn test_missing_item_is_refused_and_costs_nothing() {
        let creature = TestCreatureBuilder::new("Rocklet").with_hp(10).with_initiative(10).build();

        let (report, combatants, _) =
            run_with_item(creature, Inventory::new(), ItemKind::HealingPotion);

        assert!(report.events.contains(&BattleEvent::ActionRejected {
            side: 0,
            reason: ActionError::ItemUnavailable(ItemKind::HealingPotion),
        }));
        assert!(!report
            .events
            .iter()
            .any(|e| matches!(e, BattleEvent::ItemUsed { .. } | BattleEvent::Healed { .. })));
        assert_eq!(report.turns, 1);
        assert!(combatants[0].inventory.available().is_empty());
    }
}
