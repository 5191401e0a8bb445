use crate::battle::actions::{request_action, TurnAction};
use crate::battle::attack::apply_attack;
use crate::battle::controller::Controller;
use crate::battle::roster::{resolve_defeat, DefeatResolution};
use crate::battle::state::{BattleEvent, BattleReport, BattleRng, BattleSession, Outcome};
use crate::combatant::{Combatant, CombatantKind};
use crate::config::BattleConfig;
use crate::creature::Creature;
use crate::errors::{BattleResult, BattleStateError};
use crate::hooks::{AudioSink, Collaborators, Notifier, ProgressionHooks, StatsRecorder};
use crate::milestones::{Milestones, CATCH_EM_ALL, FIRST_CATCH, FIRST_DUEL};
use crate::progression::battle_xp;

/// Runs battles between two combatants and settles their consequences.
///
/// The engine owns everything that outlives a single battle: configuration,
/// the shared randomness source, the external collaborators and the milestone
/// registry. Per-battle state lives in a `BattleSession` created by `run`.
pub struct BattleEngine {
    config: BattleConfig,
    rng: BattleRng,
    hooks: Collaborators,
    milestones: Milestones,
    species_catalogue: Option<Vec<String>>,
    wild_zone: bool,
}

/// Whether fainting ended the battle.
#[derive(Debug, PartialEq)]
enum FaintCheck {
    NoneFainted,
    Replaced,
    Ended(Outcome),
}

impl BattleEngine {
    pub fn new(config: BattleConfig) -> Self {
        let rng = BattleRng::from_config(&config);
        Self {
            config,
            rng,
            hooks: Collaborators::default(),
            milestones: Milestones::default(),
            species_catalogue: None,
            wild_zone: false,
        }
    }

    pub fn with_rng(mut self, rng: BattleRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_collaborators(mut self, hooks: Collaborators) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_milestones(mut self, milestones: Milestones) -> Self {
        self.milestones = milestones;
        self
    }

    /// Every species that exists, for the "catch them all" milestone.
    pub fn with_species_catalogue(mut self, species: Vec<String>) -> Self {
        self.species_catalogue = Some(species);
        self
    }

    /// Battles in the wild zone get the configured catch bonus.
    pub fn in_wild_zone(mut self, wild_zone: bool) -> Self {
        self.wild_zone = wild_zone;
        self
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn rng(&self) -> &BattleRng {
        &self.rng
    }

    pub fn milestones(&self) -> &Milestones {
        &self.milestones
    }

    /// Runs one battle to completion.
    ///
    /// Returns a report whose `winner` indexes into `combatants`. Fails only
    /// when a combatant has no living creature in its battle slots; every
    /// refused action is reported in-battle and asked again instead.
    pub fn run(
        &mut self,
        combatants: &mut [Combatant; 2],
        controllers: [&mut dyn Controller; 2],
    ) -> BattleResult<BattleReport> {
        let roster_size = self.config.battle_roster_size;
        for combatant in combatants.iter_mut() {
            if !combatant.ensure_active(roster_size) {
                return Err(BattleStateError::NoLivingUnit(combatant.name.clone()).into());
            }
        }

        let span = tracing::info_span!(
            "battle",
            first = %combatants[0].name,
            second = %combatants[1].name
        );
        let _guard = span.enter();

        let Self {
            config,
            rng,
            hooks,
            milestones,
            species_catalogue,
            wild_zone,
        } = self;
        let mut controllers = controllers;

        let prior_track = hooks.audio.current_track();
        play(&mut *hooks.audio, &config.tracks.battle);

        let mut session = BattleSession::new(combatants, rng, config, &mut *hooks.messages);
        session.in_wild_zone = *wild_zone;

        let initiative = |side: usize| session.active(side).map_or(0, |c| c.initiative);
        let first_actor = if initiative(1) > initiative(0) { 1 } else { 0 };
        session.turn_index = first_actor as u32;
        tracing::info!(first_actor, "battle started");
        session.emit(BattleEvent::BattleStarted { first_actor });
        session.attach_active_effects(0);
        session.attach_active_effects(1);

        let (outcome, turns) = run_turns(&mut session, &mut controllers);

        let xp_awarded = settle(
            &mut session,
            outcome,
            &mut *hooks.stats,
            &mut *hooks.notifier,
            &mut *hooks.progression,
            milestones,
            species_catalogue.as_deref(),
        );

        session.release_active_effects(0);
        session.release_active_effects(1);
        session.finish(outcome);
        tracing::info!(?outcome, turns, "battle ended");

        let winner = outcome.winner().unwrap_or(0);
        play(&mut *hooks.audio, &config.tracks.battle_end);
        if let Some(track) = prior_track {
            play(&mut *hooks.audio, &track);
        }

        Ok(BattleReport {
            winner,
            outcome,
            turns,
            xp_awarded,
            events: session.bus.into_events(),
        })
    }
}

/// The turn loop. Returns the outcome and the number of turns started.
fn run_turns(session: &mut BattleSession, controllers: &mut [&mut dyn Controller; 2]) -> (Outcome, u32) {
    let mut turns = 0;

    loop {
        let actor = session.actor_index();
        let defender = 1 - actor;
        turns += 1;
        session.emit(BattleEvent::TurnStarted { turn: turns, side: actor });

        // A creature that cannot attack anymore is defeated before it is asked.
        if !session.active(actor).is_some_and(Creature::has_usable_attack) {
            if let Some(outcome) = exhaust(session, controllers, actor) {
                return (outcome, turns);
            }
            session.turn_index += 1;
            continue;
        }

        let skipped = tick_effects(session, actor);
        let action = if skipped {
            TurnAction::Skip
        } else {
            request_action(session, &mut *controllers[actor], actor)
        };

        match action {
            TurnAction::Won(outcome) => return (outcome, turns),
            TurnAction::Skip => {}
            TurnAction::Attack(slot) => {
                if let Err(reason) = apply_attack(session, actor, slot) {
                    session.reject(actor, reason);
                }
            }
        }

        match check_faints(session, controllers) {
            FaintCheck::Ended(outcome) => return (outcome, turns),
            FaintCheck::Replaced => {}
            FaintCheck::NoneFainted => {
                let exhausted = !session.active(actor).is_some_and(Creature::has_usable_attack);
                if exhausted {
                    if let Some(outcome) = exhaust(session, controllers, actor) {
                        return (outcome, turns);
                    }
                }
            }
        }

        tracing::trace!(actor, defender, "turn complete");
        session.turn_index += 1;
    }
}

/// Treats a creature without AP as defeated, mirroring a regular faint.
fn exhaust(
    session: &mut BattleSession,
    controllers: &mut [&mut dyn Controller; 2],
    side: usize,
) -> Option<Outcome> {
    let creature = session.active_name(side);
    session.emit(BattleEvent::AttacksExhausted { side, creature });

    match resolve_defeat(session, side, &mut *controllers[side]) {
        DefeatResolution::Replaced => None,
        DefeatResolution::Lost => Some(Outcome::Won { winner: 1 - side }),
    }
}

/// Runs the effect hooks of the actor's creature. Returns true if the actor
/// loses its turn, either to an effect or because the effect damage fainted it.
fn tick_effects(session: &mut BattleSession, actor: usize) -> bool {
    let Some(creature) = session.combatants[actor].active_mut() else {
        return false;
    };
    let name = creature.name.clone();
    let kinds: Vec<_> = creature.effects.iter().map(|effect| effect.kind()).collect();

    let mut events = Vec::new();
    let mut skipped_by = None;
    for kind in kinds {
        let Some(effect) = creature.effects.iter().find(|effect| effect.kind() == kind) else {
            continue;
        };
        let tick = effect.on_turn(session.rng);

        if tick.expired {
            creature.remove_effect(kind);
            events.push(BattleEvent::EffectExpired {
                target: name.clone(),
                effect: kind,
            });
            continue;
        }
        if tick.damage > 0 && !creature.is_fainted() {
            let dealt = creature.take_damage(tick.damage);
            events.push(BattleEvent::EffectDamage {
                target: name.clone(),
                effect: kind,
                damage: dealt,
                remaining_hp: creature.hp,
            });
        }
        if tick.skip_turn && skipped_by.is_none() {
            skipped_by = Some(kind);
        }
    }

    let fainted = creature.is_fainted();
    if let (Some(effect), false) = (skipped_by, fainted) {
        events.push(BattleEvent::TurnSkippedByEffect {
            creature: name,
            effect,
        });
    }
    session.emit_all(events);
    skipped_by.is_some() || fainted
}

/// Reports every fainted active creature and resolves each defeat.
///
/// If both active creatures fainted at once, the second side is resolved
/// first, so the first side wins when neither can send out a replacement.
fn check_faints(session: &mut BattleSession, controllers: &mut [&mut dyn Controller; 2]) -> FaintCheck {
    let fainted: Vec<usize> = (0..2)
        .filter(|&side| session.active(side).is_some_and(Creature::is_fainted))
        .collect();
    if fainted.is_empty() {
        return FaintCheck::NoneFainted;
    }
    if fainted.len() == 2 {
        tracing::warn!("both active creatures fainted, resolving the second side first");
    }

    for &side in &fainted {
        let creature = session.active_name(side);
        session.emit(BattleEvent::CreatureFainted { side, creature });
    }

    for &side in fainted.iter().rev() {
        if resolve_defeat(session, side, &mut *controllers[side]) == DefeatResolution::Lost {
            return FaintCheck::Ended(Outcome::Won { winner: 1 - side });
        }
    }
    FaintCheck::Replaced
}

/// Post-processing for a finished battle. Returns the XP handed to the winner.
fn settle(
    session: &mut BattleSession,
    outcome: Outcome,
    stats: &mut dyn StatsRecorder,
    notifier: &mut dyn Notifier,
    progression: &mut dyn ProgressionHooks,
    milestones: &mut Milestones,
    species_catalogue: Option<&[String]>,
) -> Option<u32> {
    match outcome {
        Outcome::Pending => None,
        Outcome::Fled { side } => {
            if let Some(creature) = session.active(side) {
                stats.record_ran_away(creature);
            }
            None
        }
        Outcome::Caught { side } => {
            if let Some(creature) = session.active(side) {
                stats.record_battle(creature, true);
            }
            if session.combatants[side].is_player_controlled() {
                unlock(session, milestones, notifier, FIRST_CATCH);
                let caught_all = species_catalogue.is_some_and(|species| {
                    species.iter().all(|id| session.combatants[side].has_caught(id))
                });
                if caught_all {
                    unlock(session, milestones, notifier, CATCH_EM_ALL);
                }
            }
            None
        }
        Outcome::Won { winner } => {
            let loser = 1 - winner;
            let xp_awarded = award_xp(session, winner, progression);

            let human_won = session.combatants[winner].is_player_controlled();
            if human_won && session.combatants[loser].kind == CombatantKind::Trainer {
                unlock(session, milestones, notifier, FIRST_DUEL);
            }

            if human_won {
                if let Some(creature) = session.active(winner) {
                    stats.record_battle(creature, true);
                }
            } else if let Some(creature) = session.active(loser) {
                stats.record_battle(creature, false);
            }
            xp_awarded
        }
    }
}

/// Hands the battle XP to a human winner's active creature, once, and runs
/// the level-up hooks if it gained a level.
fn award_xp(
    session: &mut BattleSession,
    winner: usize,
    progression: &mut dyn ProgressionHooks,
) -> Option<u32> {
    if !session.combatants[winner].is_player_controlled() {
        return None;
    }

    let roster_size = session.roster_size();
    let factor = session.config.xp_award_factor;
    let winner_level = session.active(winner)?.level();
    let xp = battle_xp(&session.combatants[1 - winner], winner_level, roster_size)
        .saturating_mul(factor);

    let creature = session.combatants[winner].active_mut()?;
    let name = creature.name.clone();
    let gained = creature.add_xp(xp);
    tracing::info!(creature = %name, xp, gained, "xp awarded");

    let mut events = vec![BattleEvent::XpAwarded {
        creature: name.clone(),
        xp,
    }];
    if gained > 0 {
        events.push(BattleEvent::LevelUp {
            creature: name.clone(),
            new_level: creature.level(),
        });
        for attack in progression.learn_attack(creature) {
            events.push(BattleEvent::AttackLearned {
                creature: creature.name.clone(),
                attack,
            });
        }
        if let Some((from, into)) = progression.evolve(creature) {
            events.push(BattleEvent::Evolved { from, into });
        }
    }
    session.emit_all(events);
    Some(xp)
}

fn unlock(session: &mut BattleSession, milestones: &mut Milestones, notifier: &mut dyn Notifier, id: &str) {
    if milestones.achieve(id, notifier) {
        session.emit(BattleEvent::MilestoneUnlocked { id: id.to_string() });
    }
}

/// Audio is fire-and-forget: a failed cue is logged and the battle goes on.
fn play(audio: &mut dyn AudioSink, track: &str) {
    if let Err(error) = audio.play(track) {
        tracing::warn!(%error, track, "audio cue failed");
    }
}
