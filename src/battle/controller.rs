//! The capability interface the engine uses to ask a side what to do.

use crate::combatant::Combatant;
use schema::ItemKind;
use serde::{Deserialize, Serialize};

/// One choice made at the action-selection suspension point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerChoice {
    /// Use the attack in this slot of the active creature.
    Attack(usize),
    /// Try to flee.
    Run,
    UseItem(ItemKind),
    /// Send out the creature in this roster slot. Uses up the turn.
    Switch(usize),
}

/// How the engine talks to a side. The engine validates every answer and
/// asks again when one is refused.
pub trait Controller {
    fn select_action(&mut self, me: &Combatant, opponent: &Combatant) -> PlayerChoice;

    /// Called after the active creature fainted or used up its attacks while
    /// a living reserve exists. `None` gives the battle up.
    fn select_replacement(&mut self, me: &Combatant, roster_size: usize) -> Option<usize>;

    fn confirm_escape(&mut self) -> bool;
}

/// Where a human's decisions come from: a terminal, a UI, or a test script.
pub trait ActionSource {
    fn next_choice(&mut self, me: &Combatant, opponent: &Combatant) -> PlayerChoice;
    fn confirm(&mut self, question: &str) -> bool;
    fn choose_creature(&mut self, me: &Combatant, candidates: &[usize]) -> usize;
}

pub struct HumanController<S: ActionSource> {
    source: S,
}

impl<S: ActionSource> HumanController<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: ActionSource> Controller for HumanController<S> {
    fn select_action(&mut self, me: &Combatant, opponent: &Combatant) -> PlayerChoice {
        self.source.next_choice(me, opponent)
    }

    fn select_replacement(&mut self, me: &Combatant, roster_size: usize) -> Option<usize> {
        let candidates = me.valid_switches(roster_size);
        if candidates.is_empty() {
            return None;
        }
        if !self.source.confirm("Do you want to choose another creature?") {
            return None;
        }
        Some(self.source.choose_creature(me, &candidates))
    }

    fn confirm_escape(&mut self) -> bool {
        self.source.confirm("Do you really want to run away?")
    }
}
