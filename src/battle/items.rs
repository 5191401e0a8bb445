use crate::battle::catch::throw_ball;
use crate::battle::state::{BattleEvent, BattleSession};
use schema::{ItemEffect, ItemKind};

/// How an item use leaves the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Nothing happened and no item was spent. The actor chooses again.
    Rejected,
    /// A potion was used. The actor's turn is over.
    Used,
    /// A ball was thrown and missed. The actor's turn is over.
    Missed,
    /// The target was caught. The battle is over.
    Caught,
}

pub fn use_item(session: &mut BattleSession, actor: usize, item: ItemKind) -> ItemOutcome {
    match item.effect() {
        ItemEffect::Capture(ball) => throw_ball(session, actor, item, ball),
        effect => {
            if let Err(reason) = session.combatants[actor].inventory.take(item) {
                session.reject(actor, reason);
                return ItemOutcome::Rejected;
            }
            session.emit(BattleEvent::ItemUsed { side: actor, item });
            apply_potion(session, actor, effect);
            ItemOutcome::Used
        }
    }
}

fn apply_potion(session: &mut BattleSession, actor: usize, effect: ItemEffect) {
    let Some(creature) = session.active_mut(actor) else {
        return;
    };
    let target = creature.name.clone();

    let event = match effect {
        ItemEffect::Heal(amount) => {
            let healed = creature.heal(amount);
            BattleEvent::Healed {
                target,
                amount: healed,
                new_hp: creature.hp,
            }
        }
        ItemEffect::RestoreAp => {
            creature.restore_all_ap();
            BattleEvent::ApRestored { target }
        }
        ItemEffect::Capture(_) => return,
    };
    session.emit(event);
}
