use crate::combatant::Combatant;
use crate::config::BattleConfig;
use crate::creature::Creature;
use crate::errors::ActionError;
use crate::hooks::MessageSink;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::{BallKind, EffectKind, ItemKind};
use serde::{Deserialize, Serialize};

/// How a battle ended. Every variant except `Pending` names exactly one winning side.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pending,
    /// The other side ran out of creatures able to fight.
    Won { winner: usize },
    /// `side` escaped. It is reported as the winner only to end the loop;
    /// no victory processing happens.
    Fled { side: usize },
    /// `side` captured the wild creature.
    Caught { side: usize },
}

impl Outcome {
    pub fn winner(&self) -> Option<usize> {
        match *self {
            Outcome::Pending => None,
            Outcome::Won { winner } => Some(winner),
            Outcome::Fled { side } | Outcome::Caught { side } => Some(side),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Battle Management
    BattleStarted {
        first_actor: usize,
    },
    TurnStarted {
        turn: u32,
        side: usize,
    },
    BattleEnded {
        outcome: Outcome,
    },

    // Attacks
    AttackUsed {
        side: usize,
        creature: String,
        attack: String,
    },
    AttackMissed {
        creature: String,
        attack: String,
    },
    DamageDealt {
        target: String,
        damage: u16,
        remaining_hp: u16,
    },
    AttacksExhausted {
        side: usize,
        creature: String,
    },

    // Status Effects
    EffectInflicted {
        target: String,
        effect: EffectKind,
    },
    EffectAttached {
        target: String,
        effect: EffectKind,
    },
    EffectReleased {
        target: String,
        effect: EffectKind,
    },
    EffectExpired {
        target: String,
        effect: EffectKind,
    },
    EffectDamage {
        target: String,
        effect: EffectKind,
        damage: u16,
        remaining_hp: u16,
    },
    TurnSkippedByEffect {
        creature: String,
        effect: EffectKind,
    },

    // Player choices
    ActionRejected {
        side: usize,
        reason: ActionError,
    },
    EscapeFailed {
        side: usize,
    },
    EscapeSucceeded {
        side: usize,
    },

    // Items and capture
    ItemUsed {
        side: usize,
        item: ItemKind,
    },
    Healed {
        target: String,
        amount: u16,
        new_hp: u16,
    },
    ApRestored {
        target: String,
    },
    BallThrown {
        side: usize,
        ball: BallKind,
        target: String,
    },
    CatchMissed {
        target: String,
    },
    CreatureCaught {
        side: usize,
        creature: String,
        ball: BallKind,
    },

    // Roster
    CreatureFainted {
        side: usize,
        creature: String,
    },
    CreatureSwitched {
        side: usize,
        old_creature: String,
        new_creature: String,
    },
    ReplacementDeclined {
        side: usize,
    },

    // Progression
    XpAwarded {
        creature: String,
        xp: u32,
    },
    LevelUp {
        creature: String,
        new_level: u32,
    },
    AttackLearned {
        creature: String,
        attack: String,
    },
    Evolved {
        from: String,
        into: String,
    },
    MilestoneUnlocked {
        id: String,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string using the two combatants.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self, combatants: &[Combatant; 2]) -> Option<String> {
        let side_name = |side: &usize| combatants[*side].name.as_str();

        match self {
            // === Battle Management Events ===
            BattleEvent::BattleStarted { .. } => Some(format!(
                "{} vs. {}!",
                combatants[0].name, combatants[1].name
            )),
            BattleEvent::TurnStarted { .. } => {
                None // Silent - the acting side is obvious from the next line
            }
            BattleEvent::BattleEnded { outcome } => match *outcome {
                Outcome::Won { winner } => Some(format!("{} won!", side_name(&winner))),
                Outcome::Fled { .. } | Outcome::Caught { .. } | Outcome::Pending => None,
            },

            // === Attack Events ===
            BattleEvent::AttackUsed { creature, attack, .. } => {
                Some(format!("{} used {}!", creature, attack))
            }
            BattleEvent::AttackMissed { creature, .. } => {
                Some(format!("{}'s attack missed!", creature))
            }
            BattleEvent::DamageDealt { target, damage, .. } => {
                Some(format!("{} took {} damage!", target, damage))
            }
            BattleEvent::AttacksExhausted { creature, .. } => {
                Some(format!("{} has used up all its attacks!", creature))
            }

            // === Status Effect Events ===
            BattleEvent::EffectInflicted { target, effect } => {
                Some(format!("{} {}!", target, effect.applied_phrase()))
            }
            BattleEvent::EffectAttached { .. } | BattleEvent::EffectReleased { .. } => {
                None // Silent - lifecycle bookkeeping
            }
            BattleEvent::EffectExpired { target, effect } => {
                Some(format!("{} is no longer affected by {}!", target, effect))
            }
            BattleEvent::EffectDamage { target, effect, damage, .. } => {
                Some(format!("{} took {} damage from {}!", target, damage, effect))
            }
            BattleEvent::TurnSkippedByEffect { creature, effect } => {
                Some(format!("{} can't move because of {}!", creature, effect))
            }

            // === Choice Events ===
            BattleEvent::ActionRejected { reason, .. } => Some(reason.to_string()),
            BattleEvent::EscapeFailed { .. } => Some("You failed to run away!".to_string()),
            BattleEvent::EscapeSucceeded { side } => {
                Some(format!("{} ran away!", side_name(side)))
            }

            // === Item Events ===
            BattleEvent::ItemUsed { side, item } => {
                Some(format!("{} used a {}!", side_name(side), item))
            }
            BattleEvent::Healed { target, amount, .. } => {
                Some(format!("{} recovered {} HP!", target, amount))
            }
            BattleEvent::ApRestored { target } => {
                Some(format!("{}'s attacks were restored!", target))
            }
            BattleEvent::BallThrown { side, ball, target } => {
                Some(format!("{} threw a {} at {}!", side_name(side), ball, target))
            }
            BattleEvent::CatchMissed { target } => {
                Some(format!("{} broke free!", target))
            }
            BattleEvent::CreatureCaught { side, creature, .. } => {
                Some(format!("{} caught {}!", side_name(side), creature))
            }

            // === Roster Events ===
            BattleEvent::CreatureFainted { creature, .. } => {
                Some(format!("{} is dead!", creature))
            }
            BattleEvent::CreatureSwitched {
                side,
                old_creature,
                new_creature,
            } => Some(format!(
                "{} recalled {} and sent out {}!",
                side_name(side),
                old_creature,
                new_creature
            )),
            BattleEvent::ReplacementDeclined { side } => {
                Some(format!("{} has given up!", side_name(side)))
            }

            // === Progression Events ===
            BattleEvent::XpAwarded { creature, xp } => {
                Some(format!("{} gained {} XP!", creature, xp))
            }
            BattleEvent::LevelUp { creature, new_level } => {
                Some(format!("{} reached level {}!", creature, new_level))
            }
            BattleEvent::AttackLearned { creature, attack } => {
                Some(format!("{} learned {}!", creature, attack))
            }
            BattleEvent::Evolved { from, into } => {
                Some(format!("{} evolved into {}!", from, into))
            }
            BattleEvent::MilestoneUnlocked { .. } => {
                None // Silent - the notifier shows milestones
            }
        }
    }
}

/// Event bus for collecting battle events in the order they happened.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        tracing::debug!(?event, "battle event");
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }
}

/// The single randomness source of a battle session.
///
/// `Scripted` replays percent values in order and panics with the draw reason
/// once it runs dry, so tests fail loudly when a resolution path draws more
/// often than expected.
#[derive(Debug, Clone)]
pub enum BattleRng {
    Seeded(StdRng),
    Scripted { outcomes: Vec<u8>, index: usize },
}

impl BattleRng {
    pub fn new_seeded(seed: u64) -> Self {
        BattleRng::Seeded(StdRng::seed_from_u64(seed))
    }

    pub fn new_random() -> Self {
        BattleRng::Seeded(StdRng::from_os_rng())
    }

    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        BattleRng::Scripted { outcomes, index: 0 }
    }

    /// Seeded from the config when it carries a seed, OS-seeded otherwise.
    pub fn from_config(config: &BattleConfig) -> Self {
        match config.seed {
            Some(seed) => Self::new_seeded(seed),
            None => Self::new_random(),
        }
    }

    /// Uniform integer in `[0, 100)`.
    pub fn next_percent(&mut self, reason: &str) -> u8 {
        let outcome = match self {
            BattleRng::Seeded(rng) => rng.random_range(0..100),
            BattleRng::Scripted { outcomes, index } => {
                let outcome = Self::next_scripted(outcomes, index, reason);
                outcome.min(99)
            }
        };
        tracing::trace!(outcome, reason, "rng percent draw");
        outcome
    }

    /// Uniform float in `[0, 1)`. Scripted values are read as percents.
    pub fn next_fraction(&mut self, reason: &str) -> f64 {
        let outcome = match self {
            BattleRng::Seeded(rng) => rng.random::<f64>(),
            BattleRng::Scripted { outcomes, index } => {
                f64::from(Self::next_scripted(outcomes, index, reason).min(99)) / 100.0
            }
        };
        tracing::trace!(outcome, reason, "rng fraction draw");
        outcome
    }

    /// Percent check. 0 and 100 are certain outcomes and leave the source untouched.
    pub fn roll_chance(&mut self, chance: u8, reason: &str) -> bool {
        match chance {
            0 => false,
            100..=u8::MAX => true,
            _ => self.next_percent(reason) < chance,
        }
    }

    /// Number of scripted values not yet drawn. Always 0 for a seeded source.
    pub fn remaining(&self) -> usize {
        match self {
            BattleRng::Seeded(_) => 0,
            BattleRng::Scripted { outcomes, index } => outcomes.len() - *index,
        }
    }

    fn next_scripted(outcomes: &[u8], index: &mut usize, reason: &str) -> u8 {
        if *index >= outcomes.len() {
            panic!(
                "BattleRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = outcomes[*index];
        *index += 1;
        outcome
    }
}

/// Both combatants mutably, `actor` first.
pub fn split_pair(combatants: &mut [Combatant; 2], actor: usize) -> (&mut Combatant, &mut Combatant) {
    let (first, second) = combatants.split_at_mut(1);
    if actor == 0 {
        (&mut first[0], &mut second[0])
    } else {
        (&mut second[0], &mut first[0])
    }
}

/// Mutable state of one battle, passed explicitly to every resolution step.
pub struct BattleSession<'a> {
    pub combatants: &'a mut [Combatant; 2],
    pub rng: &'a mut BattleRng,
    pub config: &'a BattleConfig,
    messages: &'a mut dyn MessageSink,
    pub bus: EventBus,
    /// Monotonic. `turn_index % 2` is the side whose turn it is.
    pub turn_index: u32,
    pub outcome: Outcome,
    /// Whether the battle takes place in the designated wild zone.
    pub in_wild_zone: bool,
}

impl<'a> BattleSession<'a> {
    pub fn new(
        combatants: &'a mut [Combatant; 2],
        rng: &'a mut BattleRng,
        config: &'a BattleConfig,
        messages: &'a mut dyn MessageSink,
    ) -> Self {
        Self {
            combatants,
            rng,
            config,
            messages,
            bus: EventBus::new(),
            turn_index: 0,
            outcome: Outcome::Pending,
            in_wild_zone: false,
        }
    }

    /// Records an event and shows its text, if it has any, before control
    /// returns to a suspension point.
    pub fn emit(&mut self, event: BattleEvent) {
        if let Some(text) = event.format(&*self.combatants) {
            self.messages.message(&text);
        }
        self.bus.push(event);
    }

    /// Reports an action that was refused. The caller re-prompts.
    pub fn reject(&mut self, side: usize, reason: ActionError) {
        tracing::debug!(side, %reason, "action rejected");
        self.emit(BattleEvent::ActionRejected { side, reason });
    }

    pub fn emit_all(&mut self, events: impl IntoIterator<Item = BattleEvent>) {
        for event in events {
            self.emit(event);
        }
    }

    pub fn actor_index(&self) -> usize {
        (self.turn_index % 2) as usize
    }

    pub fn active(&self, side: usize) -> Option<&Creature> {
        self.combatants.get(side).and_then(Combatant::active)
    }

    pub fn active_mut(&mut self, side: usize) -> Option<&mut Creature> {
        self.combatants.get_mut(side).and_then(Combatant::active_mut)
    }

    /// Display name of the active creature of `side`, empty if there is none.
    pub fn active_name(&self, side: usize) -> String {
        self.active(side)
            .map(|creature| creature.name.clone())
            .unwrap_or_default()
    }

    pub fn roster_size(&self) -> usize {
        self.config.battle_roster_size
    }

    /// Attaches the held effects of the active creature of `side`.
    pub fn attach_active_effects(&mut self, side: usize) {
        let Some(creature) = self.active_mut(side) else {
            return;
        };
        let target = creature.name.clone();
        let attached = creature.attach_effects();
        self.emit_all(attached.into_iter().map(|effect| BattleEvent::EffectAttached {
            target: target.clone(),
            effect,
        }));
    }

    /// Releases the held effects of the active creature of `side`. Safe to
    /// call on every exit path: an already released effect is not reported again.
    pub fn release_active_effects(&mut self, side: usize) {
        let Some(creature) = self.active_mut(side) else {
            return;
        };
        let target = creature.name.clone();
        let released = creature.release_effects();
        self.emit_all(released.into_iter().map(|effect| BattleEvent::EffectReleased {
            target: target.clone(),
            effect,
        }));
    }

    pub fn finish(&mut self, outcome: Outcome) {
        self.outcome = outcome;
        self.emit(BattleEvent::BattleEnded { outcome });
    }
}

/// What `run` hands back to the caller.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleReport {
    /// Index into the combatant array that was passed to `run`.
    pub winner: usize,
    pub outcome: Outcome,
    pub turns: u32,
    /// Total XP handed to the winner's active creature, if any was awarded.
    pub xp_awarded: Option<u32>,
    pub events: Vec<BattleEvent>,
}

impl BattleReport {
    /// The winning combatant out of the array the battle ran on.
    pub fn winner_of<'c>(&self, combatants: &'c [Combatant; 2]) -> &'c Combatant {
        &combatants[self.winner]
    }

    pub fn loser(&self) -> usize {
        1 - self.winner
    }
}
