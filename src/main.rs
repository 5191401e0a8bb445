//! Plays one battle in the terminal against bundled or user-supplied content.

use clap::Parser;
use creature_battle::battle::ai::{NpcController, ScoringAI};
use creature_battle::battle::controller::{Controller, HumanController};
use creature_battle::terminal::{Console, TerminalSource};
use creature_battle::{
    BattleConfig, BattleEngine, BattleEngineError, BattleLedger, Collaborators, Combatant,
    ContentLibrary, ContentProgression, ContentProvider, Inventory, ItemKind, Outcome,
};
use std::cell::RefCell;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "creature-battle", author, version, about = "Fight one creature battle in the terminal")]
struct Args {
    /// RON file with species and attacks. Defaults to the bundled content.
    #[arg(long)]
    content: Option<PathBuf>,

    /// RON file with battle rules.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible battle.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Species of your lead creature.
    #[arg(long, default_value = "rocklet")]
    starter: String,

    /// Species you fight against.
    #[arg(long, default_value = "mossling")]
    opponent: String,

    #[arg(short, long, default_value_t = 5)]
    level: u32,

    /// Fight a trainer with a full team instead of a wild creature.
    #[arg(long)]
    trainer: bool,

    /// Forbid running away, as in a scripted encounter.
    #[arg(long)]
    no_escape: bool,

    /// Overrides the XP multiplier of the opponent.
    #[arg(long)]
    xp_multiplier: Option<u32>,

    /// Let the AI play your side.
    #[arg(long)]
    auto: bool,

    /// Write the battle events as JSON to this file.
    #[arg(long)]
    events_json: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Engine(#[from] BattleEngineError),
    #[error("Could not write events: {0}")]
    Events(String),
}

impl From<creature_battle::ContentError> for CliError {
    fn from(error: creature_battle::ContentError) -> Self {
        CliError::Engine(error.into())
    }
}

impl From<creature_battle::ConfigError> for CliError {
    fn from(error: creature_battle::ConfigError) -> Self {
        CliError::Engine(error.into())
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::from_default_env().add_directive(Level::WARN.into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let content = match &args.content {
        Some(path) => ContentLibrary::load(path)?,
        None => ContentLibrary::bundled()?,
    };
    let mut config = match &args.config {
        Some(path) => BattleConfig::load(path)?,
        None => BattleConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let starter = content.instantiate(&args.starter, args.level)?;
    let player = Combatant::player("Player", vec![starter]).with_inventory(
        Inventory::new()
            .with(ItemKind::HealingPotion, 3)
            .with(ItemKind::ApPotion, 1)
            .with(ItemKind::StandardBall, 5)
            .with(ItemKind::HyperBall, 1),
    );

    let opponent = if args.trainer {
        let roster = content
            .species_ids()
            .iter()
            .filter(|id| **id != args.opponent)
            .take(2)
            .map(|id| content.instantiate(id, args.level))
            .collect::<Result<Vec<_>, _>>()?;
        let mut team = vec![content.instantiate(&args.opponent, args.level)?];
        team.extend(roster);
        Combatant::trainer("Trainer Ace", team)
    } else {
        Combatant::wild(content.instantiate(&args.opponent, args.level)?)
    };
    let escapable = opponent.escapable && !args.no_escape;
    let mut opponent = opponent.with_escapable(escapable);
    if let Some(multiplier) = args.xp_multiplier {
        opponent = opponent.with_xp_multiplier(multiplier);
    }

    let console = Rc::new(RefCell::new(Console::stdout()));
    let ledger = Rc::new(RefCell::new(BattleLedger::new()));
    let collaborators = Collaborators::default()
        .with_messages(Rc::clone(&console))
        .with_notifier(Rc::clone(&console))
        .with_audio(Rc::clone(&console))
        .with_stats(Rc::clone(&ledger))
        .with_progression(ContentProgression::new(content.clone()));

    let mut engine = BattleEngine::new(config)
        .with_collaborators(collaborators)
        .with_species_catalogue(content.species_ids())
        .in_wild_zone(!args.trainer);

    let mut player_side: Box<dyn Controller> = if args.auto {
        Box::new(NpcController::new(ScoringAI::new()))
    } else {
        Box::new(HumanController::new(TerminalSource::stdio()))
    };
    let mut opponent_side = NpcController::new(ScoringAI::new());

    let mut combatants = [player, opponent];
    let report = engine.run(&mut combatants, [player_side.as_mut(), &mut opponent_side])?;
    tracing::info!(turns = report.turns, outcome = ?report.outcome, "battle finished");

    let summary = match report.outcome {
        Outcome::Won { winner: 0 } => "You won the battle!".to_string(),
        Outcome::Won { .. } => "You lost the battle!".to_string(),
        Outcome::Fled { side: 0 } => "You got away safely.".to_string(),
        Outcome::Caught { side: 0 } => "The creature joined your team!".to_string(),
        other => format!("The battle ended: {:?}", other),
    };
    println!("\n{} ({} turns)", summary, report.turns);

    for creature in &combatants[0].roster {
        let record = ledger.borrow().record(&creature.name);
        println!(
            "  {} Lv {}: {} battles, {} wins, {} losses, ran away {} times",
            creature.name,
            creature.level(),
            record.battles,
            record.wins,
            record.losses,
            record.ran_away
        );
    }

    if let Some(path) = &args.events_json {
        let json = serde_json::to_string_pretty(&report.events)
            .map_err(|e| CliError::Events(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| CliError::Events(format!("{}: {}", path.display(), e)))?;
    }

    Ok(())
}
