use crate::battle::controller::{ActionSource, HumanController, PlayerChoice};
use crate::battle::engine::BattleEngine;
use crate::battle::state::{BattleEvent, BattleReport, BattleRng};
use crate::combatant::Combatant;
use crate::config::BattleConfig;
use crate::creature::{AttackSlot, Creature};
use crate::effects::StatusEffect;
use crate::errors::BattleResult;
use crate::hooks::{Collaborators, MessageLog, NotificationLog, TrackLog};
use crate::stats::BattleLedger;
use schema::{AttackData, BaseStats, EffectKind, SpeciesData};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// A builder for test creatures with exact stats.
///
/// # Example
/// ```ignore
/// let creature = TestCreatureBuilder::new("Mossling")
///     .with_full_hp(40)
///     .with_hp(12)
///     .with_effect(EffectKind::Sleep)
///     .build();
/// ```
pub struct TestCreatureBuilder {
    name: String,
    level: u32,
    full_hp: u16,
    hp: Option<u16>,
    attack: u16,
    defense: u16,
    initiative: i32,
    lose_xp: u32,
    attacks: Vec<AttackSlot>,
    effects: Vec<EffectKind>,
}

impl TestCreatureBuilder {
    /// Level 1, 20 hp, attack and defense 5, initiative 0.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: 1,
            full_hp: 20,
            hp: None,
            attack: 5,
            defense: 5,
            initiative: 0,
            lose_xp: 1,
            attacks: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_full_hp(mut self, full_hp: u16) -> Self {
        self.full_hp = full_hp;
        self
    }

    /// Sets the current hp. If not set, hp will be full.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn with_attack_stat(mut self, attack: u16) -> Self {
        self.attack = attack;
        self
    }

    pub fn with_defense(mut self, defense: u16) -> Self {
        self.defense = defense;
        self
    }

    pub fn with_initiative(mut self, initiative: i32) -> Self {
        self.initiative = initiative;
        self
    }

    pub fn with_lose_xp(mut self, lose_xp: u32) -> Self {
        self.lose_xp = lose_xp;
        self
    }

    /// Adds a known attack. Without any, the creature knows a 5-damage Tackle.
    pub fn with_attack(mut self, id: &str, data: AttackData) -> Self {
        self.attacks.push(AttackSlot::new(id, data));
        self
    }

    /// Gives the creature a detached effect, as if left over from an earlier battle.
    pub fn with_effect(mut self, kind: EffectKind) -> Self {
        self.effects.push(kind);
        self
    }

    pub fn build(self) -> Creature {
        let level_bonus = self.level as u16;
        let species = SpeciesData {
            name: self.name.clone(),
            description: String::new(),
            // Stats derive as base + level, so level-ups keep the requested numbers as a floor.
            base_stats: BaseStats {
                hp: self.full_hp.saturating_sub(level_bonus),
                attack: self.attack.saturating_sub(level_bonus),
                defense: self.defense.saturating_sub(level_bonus),
                initiative: self.initiative - self.level as i32,
            },
            lose_xp: self.lose_xp,
            attacks: Vec::new(),
            learnset: Vec::new(),
            evolution_data: None,
        };

        let attacks = if self.attacks.is_empty() {
            vec![AttackSlot::new("tackle", AttackData::fixed("Tackle", 5, 20))]
        } else {
            self.attacks
        };

        let mut creature = Creature::new(&self.name.to_lowercase(), &species, self.level, attacks);
        creature.full_hp = self.full_hp;
        creature.attack = self.attack;
        creature.defense = self.defense;
        creature.initiative = self.initiative;
        creature.hp = self.hp.unwrap_or(self.full_hp).min(self.full_hp);
        creature.effects = self.effects.into_iter().map(StatusEffect::new).collect();
        creature
    }
}

/// An action source that replays a fixed script and records every question.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    choices: VecDeque<PlayerChoice>,
    confirmations: VecDeque<bool>,
    creatures: VecDeque<usize>,
    pub questions: Vec<String>,
}

impl ScriptedSource {
    pub fn new(choices: Vec<PlayerChoice>) -> Self {
        Self {
            choices: choices.into(),
            ..Self::default()
        }
    }

    pub fn with_confirmations(mut self, answers: Vec<bool>) -> Self {
        self.confirmations = answers.into();
        self
    }

    pub fn with_creatures(mut self, indices: Vec<usize>) -> Self {
        self.creatures = indices.into();
        self
    }

    pub fn choices_left(&self) -> usize {
        self.choices.len()
    }
}

impl ActionSource for ScriptedSource {
    fn next_choice(&mut self, me: &Combatant, _opponent: &Combatant) -> PlayerChoice {
        match self.choices.pop_front() {
            Some(choice) => choice,
            None => panic!("ScriptedSource ran out of choices for {}", me.name),
        }
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.questions.push(question.to_string());
        match self.confirmations.pop_front() {
            Some(answer) => answer,
            None => panic!("ScriptedSource has no answer for '{}'", question),
        }
    }

    fn choose_creature(&mut self, me: &Combatant, _candidates: &[usize]) -> usize {
        match self.creatures.pop_front() {
            Some(index) => index,
            None => panic!("ScriptedSource has no replacement for {}", me.name),
        }
    }
}

/// A human controller fed from a script.
pub fn scripted(choices: Vec<PlayerChoice>) -> HumanController<ScriptedSource> {
    HumanController::new(ScriptedSource::new(choices))
}

/// Shared handles on the in-memory collaborators, so a test can look at
/// what the engine reported after the battle.
#[derive(Default)]
pub struct Recorders {
    pub messages: Rc<RefCell<MessageLog>>,
    pub notifications: Rc<RefCell<NotificationLog>>,
    pub tracks: Rc<RefCell<TrackLog>>,
    pub ledger: Rc<RefCell<BattleLedger>>,
}

impl Recorders {
    pub fn collaborators(&self) -> Collaborators {
        Collaborators::default()
            .with_messages(Rc::clone(&self.messages))
            .with_notifier(Rc::clone(&self.notifications))
            .with_audio(Rc::clone(&self.tracks))
            .with_stats(Rc::clone(&self.ledger))
    }

    pub fn lines(&self) -> Vec<String> {
        self.messages.borrow().lines.clone()
    }
}

/// An engine with default rules, scripted randomness and recording collaborators.
pub fn test_engine(outcomes: Vec<u8>) -> (BattleEngine, Recorders) {
    let recorders = Recorders::default();
    let engine = BattleEngine::new(BattleConfig::default())
        .with_rng(BattleRng::new_for_test(outcomes))
        .with_collaborators(recorders.collaborators());
    (engine, recorders)
}

/// Helper function to assert that a Result is Ok and return the value.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}

/// Counts the events matching `predicate` in a finished battle.
pub fn count_events(report: &BattleReport, predicate: impl Fn(&BattleEvent) -> bool) -> usize {
    report.events.iter().filter(|event| predicate(event)).count()
}
