use crate::battle::controller::Controller;
use crate::battle::state::{BattleEvent, BattleSession};
use crate::errors::ActionError;

/// What happened after a side lost its active creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefeatResolution {
    /// A living reserve took the field.
    Replaced,
    /// No reserve was left or the side gave up. The battle is over.
    Lost,
}

/// Sends out the creature in roster slot `index` for `side`.
///
/// The outgoing creature's effects are released before the incoming
/// creature's effects are attached, each exactly once.
pub fn switch_active(session: &mut BattleSession, side: usize, index: usize) -> Result<(), ActionError> {
    let roster_size = session.roster_size();
    session.combatants[side].validate_switch(index, roster_size)?;

    let old_creature = session.active_name(side);
    session.release_active_effects(side);
    session.combatants[side].active_index = index;
    session.attach_active_effects(side);
    let new_creature = session.active_name(side);

    tracing::debug!(side, index, "creature switched");
    session.emit(BattleEvent::CreatureSwitched {
        side,
        old_creature,
        new_creature,
    });
    Ok(())
}

/// Handles a defeated active creature: asks for a replacement while one in
/// the battle slots can still fight, otherwise the side loses.
pub fn resolve_defeat(
    session: &mut BattleSession,
    side: usize,
    controller: &mut dyn Controller,
) -> DefeatResolution {
    let roster_size = session.roster_size();
    if !session.combatants[side].has_ready_reserve(roster_size) {
        return DefeatResolution::Lost;
    }

    loop {
        let choice = controller.select_replacement(&session.combatants[side], roster_size);
        match choice {
            None => {
                session.emit(BattleEvent::ReplacementDeclined { side });
                return DefeatResolution::Lost;
            }
            Some(index) => match switch_active(session, side, index) {
                Ok(()) => return DefeatResolution::Replaced,
                Err(reason) => session.reject(side, reason),
            },
        }
    }
}
