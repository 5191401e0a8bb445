use crate::battle::catch::{can_attempt_catch, catch_bonus, catch_weights, roll_catch};
use crate::battle::items::ItemOutcome;
use crate::battle::state::{BattleEvent, BattleSession};
use schema::{BallKind, ItemKind};

/// Throws `ball` at the opposing active creature.
///
/// Validation happens before the item is taken, so a rejected throw costs
/// nothing. On success the creature leaves the wild roster, its effects are
/// released and it joins the thrower's roster tagged with the ball used.
pub fn throw_ball(
    session: &mut BattleSession,
    thrower: usize,
    item: ItemKind,
    ball: BallKind,
) -> ItemOutcome {
    if let Err(error) = can_attempt_catch(session.combatants, thrower) {
        session.reject(thrower, error.into());
        return ItemOutcome::Rejected;
    }
    if let Err(reason) = session.combatants[thrower].inventory.take(item) {
        session.reject(thrower, reason);
        return ItemOutcome::Rejected;
    }

    let target_side = 1 - thrower;
    let Some(target) = session.active(target_side) else {
        return ItemOutcome::Rejected;
    };
    let target_name = target.name.clone();
    let bonus = catch_bonus(
        target,
        session.in_wild_zone,
        session.config.wild_zone_catch_bonus,
    );
    let weights = catch_weights(target, ball, bonus);
    tracing::debug!(
        catch = weights.catch,
        miss = weights.miss,
        bonus,
        "catch weights"
    );

    session.emit(BattleEvent::BallThrown {
        side: thrower,
        ball,
        target: target_name.clone(),
    });

    if !roll_catch(&weights, session.rng) {
        session.emit(BattleEvent::CatchMissed {
            target: target_name,
        });
        return ItemOutcome::Missed;
    }

    session.release_active_effects(target_side);
    let wild = &mut session.combatants[target_side];
    let mut creature = wild.roster.remove(wild.active_index);
    wild.active_index = 0;
    creature.caught_with = Some(ball);
    session.combatants[thrower].add_creature(creature);

    tracing::info!(thrower, creature = %target_name, %ball, "creature caught");
    session.emit(BattleEvent::CreatureCaught {
        side: thrower,
        creature: target_name,
        ball,
    });
    ItemOutcome::Caught
}
