//! Line-based terminal front end.
//!
//! Status displays, a command parser for player input, an [`ActionSource`]
//! that reads commands from any `BufRead`, and a console collaborator that
//! prints battle messages and notifications.

use crate::battle::ai::{Behavior, FirstUsableAI};
use crate::battle::controller::{ActionSource, PlayerChoice};
use crate::combatant::Combatant;
use crate::creature::Creature;
use crate::errors::AudioError;
use crate::hooks::{AudioSink, MessageSink, Notifier};
use schema::ItemKind;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  <n> | attack <n|name>   use the attack in slot n, or by name
  item <name>             use an item, e.g. 'item healing potion'
  switch <n>              send out the creature in roster slot n
  run                     try to run away
  check self|opponent|team|items
  help";

/// Something the player typed at the action prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Choice(PlayerChoice),
    Check(CheckTarget),
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckTarget {
    Active,
    Opponent,
    Team,
    Items,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Please enter a command. Type 'help' for a list.")]
    Empty,
    #[error("Unknown command '{0}'. Type 'help' for a list.")]
    Unknown(String),
    #[error("What do you want to {0}?")]
    MissingArgument(&'static str),
    #[error("'{0}' is not a valid number.")]
    InvalidNumber(String),
    #[error("There is no item called '{0}'.")]
    UnknownItem(String),
    #[error("'{0}' is not an attack your creature knows.")]
    UnknownAttack(String),
    #[error("Unknown check command. Use 'self', 'opponent', 'team' or 'items'.")]
    UnknownCheck(String),
}

/// Parses a 1-based slot number.
fn parse_slot(arg: &str) -> Result<usize, CommandError> {
    match arg.parse::<usize>() {
        Ok(number) if number > 0 => Ok(number - 1),
        _ => Err(CommandError::InvalidNumber(arg.to_string())),
    }
}

fn attack_by_name(name: &str, me: &Combatant) -> Option<usize> {
    me.active()?
        .attacks
        .iter()
        .position(|slot| slot.name().eq_ignore_ascii_case(name) || slot.id.eq_ignore_ascii_case(name))
}

/// Parses one line of player input. Attacks may be named instead of numbered.
pub fn parse_command(input: &str, me: &Combatant) -> Result<Command, CommandError> {
    let input = input.trim();
    let Some((verb, args)) = input
        .split_once(char::is_whitespace)
        .map(|(verb, args)| (verb, args.trim()))
        .or_else(|| (!input.is_empty()).then_some((input, "")))
    else {
        return Err(CommandError::Empty);
    };

    let choice = match verb.to_lowercase().as_str() {
        "help" | "?" => return Ok(Command::Help),
        "run" | "flee" => PlayerChoice::Run,
        "check" => {
            let target = match args.to_lowercase().as_str() {
                "" => return Err(CommandError::MissingArgument("check")),
                "self" => CheckTarget::Active,
                "opponent" => CheckTarget::Opponent,
                "team" => CheckTarget::Team,
                "items" | "bag" => CheckTarget::Items,
                other => return Err(CommandError::UnknownCheck(other.to_string())),
            };
            return Ok(Command::Check(target));
        }
        "attack" => {
            if args.is_empty() {
                return Err(CommandError::MissingArgument("attack with"));
            }
            match parse_slot(args) {
                Ok(slot) => PlayerChoice::Attack(slot),
                Err(_) => attack_by_name(args, me)
                    .map(PlayerChoice::Attack)
                    .ok_or_else(|| CommandError::UnknownAttack(args.to_string()))?,
            }
        }
        "item" | "use" => {
            if args.is_empty() {
                return Err(CommandError::MissingArgument("use"));
            }
            let key = args.to_lowercase().split_whitespace().collect::<Vec<_>>().join("_");
            let item =
                ItemKind::from_str(&key).map_err(|_| CommandError::UnknownItem(args.to_string()))?;
            PlayerChoice::UseItem(item)
        }
        "switch" => {
            if args.is_empty() {
                return Err(CommandError::MissingArgument("switch to"));
            }
            PlayerChoice::Switch(parse_slot(args)?)
        }
        _ if verb.chars().all(|c| c.is_ascii_digit()) && args.is_empty() => {
            PlayerChoice::Attack(parse_slot(verb)?)
        }
        _ => attack_by_name(input, me)
            .map(PlayerChoice::Attack)
            .ok_or_else(|| CommandError::Unknown(input.to_string()))?,
    };
    Ok(Command::Choice(choice))
}

fn creature_line(creature: &Creature) -> String {
    let mut line = format!(
        "{} (Lv {}) HP {}/{}",
        creature.name,
        creature.level(),
        creature.hp,
        creature.full_hp
    );
    for effect in &creature.effects {
        line.push_str(&format!(" [{}]", effect.kind()));
    }
    line
}

/// The creature's summary line followed by its attacks.
pub fn display_creature(creature: &Creature) -> String {
    let mut output = creature_line(creature);
    output.push('\n');
    for (i, slot) in creature.attacks.iter().enumerate() {
        output.push_str(&format!(
            "  {}. {} (AP {}/{})\n",
            i + 1,
            slot.name(),
            slot.ap,
            slot.max_ap()
        ));
    }
    output
}

pub fn display_self_status(me: &Combatant) -> String {
    match me.active() {
        Some(creature) => format!("--- Your Active Creature ---\n{}", display_creature(creature)),
        None => "You have no active creature.".to_string(),
    }
}

/// Only what can be seen from across the field: no attacks or AP.
pub fn display_opponent_status(opponent: &Combatant) -> String {
    let active = opponent
        .active()
        .map(creature_line)
        .unwrap_or_else(|| "nothing".to_string());
    format!("--- Opponent's Status ---\n{} fields {}\n", opponent.name, active)
}

pub fn display_team_status(me: &Combatant) -> String {
    let mut output = String::from("--- Your Team ---\n");
    for (i, creature) in me.roster.iter().enumerate() {
        let active_marker = if i == me.active_index { " (Active)" } else { "" };
        let fainted_marker = if creature.is_fainted() { " (Fainted)" } else { "" };
        output.push_str(&format!(
            " {}. {}{}{}\n",
            i + 1,
            creature_line(creature),
            active_marker,
            fainted_marker
        ));
    }
    output
}

pub fn display_inventory(me: &Combatant) -> String {
    let items = me.inventory.available();
    if items.is_empty() {
        return "Your bag is empty.".to_string();
    }
    let mut output = String::from("--- Your Bag ---\n");
    for (item, count) in items {
        output.push_str(&format!("  {} x{}\n", item, count));
    }
    output
}

pub fn handle_check_command(target: CheckTarget, me: &Combatant, opponent: &Combatant) -> String {
    match target {
        CheckTarget::Active => display_self_status(me),
        CheckTarget::Opponent => display_opponent_status(opponent),
        CheckTarget::Team => display_team_status(me),
        CheckTarget::Items => display_inventory(me),
    }
}

/// Reads player commands line by line. When the input closes, the source
/// falls back to the first usable attack and declines every question.
pub struct TerminalSource<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl TerminalSource<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalSource<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, text: &str) {
        if let Err(error) = writeln!(self.output, "{}", text.trim_end()) {
            tracing::warn!(%error, "failed to write to the terminal");
        }
    }

    fn read_line(&mut self) -> Option<String> {
        if let Err(error) = write!(self.output, "> ").and_then(|_| self.output.flush()) {
            tracing::warn!(%error, "failed to write the prompt");
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(error) => {
                tracing::warn!(%error, "failed to read player input");
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> ActionSource for TerminalSource<R, W> {
    fn next_choice(&mut self, me: &Combatant, opponent: &Combatant) -> PlayerChoice {
        self.say(&format!("What will {} do?", me.name));
        if let Some(creature) = me.active() {
            self.say(&display_creature(creature));
        }

        loop {
            let Some(line) = self.read_line() else {
                tracing::warn!("input closed, using the first usable attack");
                return FirstUsableAI.decide_action(me, opponent);
            };
            match parse_command(&line, me) {
                Ok(Command::Choice(choice)) => return choice,
                Ok(Command::Check(target)) => {
                    let text = handle_check_command(target, me, opponent);
                    self.say(&text);
                }
                Ok(Command::Help) => self.say(HELP),
                Err(error) => self.say(&error.to_string()),
            }
        }
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.say(&format!("{} (y/n)", question));
        loop {
            let Some(answer) = self.read_line() else {
                return false;
            };
            match answer.to_lowercase().as_str() {
                "y" | "yes" => return true,
                "n" | "no" => return false,
                _ => self.say("Please answer 'y' or 'n'."),
            }
        }
    }

    fn choose_creature(&mut self, me: &Combatant, candidates: &[usize]) -> usize {
        let fallback = candidates.first().copied().unwrap_or(me.active_index);
        self.say("Which creature do you want to send out?");
        for &index in candidates {
            self.say(&format!(" {}. {}", index + 1, creature_line(&me.roster[index])));
        }

        loop {
            let Some(line) = self.read_line() else {
                return fallback;
            };
            match parse_slot(&line) {
                Ok(index) if candidates.contains(&index) => return index,
                Ok(_) => self.say("That creature can't be sent out."),
                Err(error) => self.say(&error.to_string()),
            }
        }
    }
}

/// Prints battle messages and notifications. Audio cues only go to the log,
/// a terminal has nothing to play them on.
pub struct Console<W: Write> {
    output: W,
    track: Option<String>,
}

impl Console<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(output: W) -> Self {
        Self { output, track: None }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn write(&mut self, text: &str) {
        if let Err(error) = writeln!(self.output, "{}", text) {
            tracing::warn!(%error, "failed to write to the console");
        }
    }
}

impl<W: Write> MessageSink for Console<W> {
    fn message(&mut self, text: &str) {
        self.write(text);
    }
}

impl<W: Write> Notifier for Console<W> {
    fn notify(&mut self, title: &str, category: &str, body: &str) {
        self.write(&format!("*** {} ({}) ***\n{}", title, category, body));
    }
}

impl<W: Write> AudioSink for Console<W> {
    fn play(&mut self, track_id: &str) -> Result<(), AudioError> {
        tracing::info!(track = track_id, "audio cue");
        self.track = Some(track_id.to_string());
        Ok(())
    }

    fn current_track(&self) -> Option<String> {
        self.track.clone()
    }
}
