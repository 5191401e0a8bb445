use crate::battle::attack::validate_attack;
use crate::battle::controller::{Controller, PlayerChoice};
use crate::battle::items::{use_item, ItemOutcome};
use crate::battle::roster::switch_active;
use crate::battle::state::{BattleEvent, BattleSession, Outcome};
use crate::config::EscapeOdds;
use crate::errors::ActionError;

/// What a side's turn resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    /// The battle is over: the side escaped or caught its opponent.
    Won(Outcome),
    /// The turn was used up without an attack.
    Skip,
    /// Resolve the attack in this slot.
    Attack(usize),
}

/// Percent chance an escape attempt fails:
/// `clamp(base - (actor.initiative - defender.initiative), min, max)`.
pub fn escape_failure_chance(odds: &EscapeOdds, actor_initiative: i32, defender_initiative: i32) -> i32 {
    let raw = odds.base_failure - (actor_initiative - defender_initiative);
    raw.min(odds.max_failure).max(odds.min_failure)
}

/// Asks `controller` for the actor's choice until one is accepted.
///
/// Refused choices are reported and asked again, so the only way out is an
/// attack to resolve, a used-up turn or the end of the battle.
pub fn request_action(
    session: &mut BattleSession,
    controller: &mut dyn Controller,
    actor: usize,
) -> TurnAction {
    let defender = 1 - actor;

    loop {
        let choice =
            controller.select_action(&session.combatants[actor], &session.combatants[defender]);
        tracing::debug!(actor, ?choice, "action selected");

        match choice {
            PlayerChoice::Attack(slot) => match validate_attack(session, actor, slot) {
                Ok(()) => return TurnAction::Attack(slot),
                Err(reason) => session.reject(actor, reason),
            },
            PlayerChoice::Run => {
                if !session.combatants[defender].escapable {
                    session.reject(actor, ActionError::EscapeForbidden);
                    continue;
                }
                if !controller.confirm_escape() {
                    continue;
                }
                return attempt_escape(session, actor);
            }
            PlayerChoice::UseItem(item) => match use_item(session, actor, item) {
                ItemOutcome::Rejected => {}
                ItemOutcome::Used | ItemOutcome::Missed => return TurnAction::Skip,
                ItemOutcome::Caught => return TurnAction::Won(Outcome::Caught { side: actor }),
            },
            PlayerChoice::Switch(index) => match switch_active(session, actor, index) {
                Ok(()) => return TurnAction::Skip,
                Err(reason) => session.reject(actor, reason),
            },
        }
    }
}

/// Rolls an escape for `actor`. A failed attempt uses up the turn.
pub fn attempt_escape(session: &mut BattleSession, actor: usize) -> TurnAction {
    let initiative = |side: usize| session.active(side).map_or(0, |c| c.initiative);
    let chance = escape_failure_chance(
        &session.config.escape,
        initiative(actor),
        initiative(1 - actor),
    );

    let roll = session.rng.next_percent("escape roll");
    tracing::debug!(actor, chance, roll, "escape attempt");

    if i32::from(roll) < chance {
        session.emit(BattleEvent::EscapeFailed { side: actor });
        TurnAction::Skip
    } else {
        session.emit(BattleEvent::EscapeSucceeded { side: actor });
        TurnAction::Won(Outcome::Fled { side: actor })
    }
}
