//! Boundaries between the battle engine and the rest of the game.
//!
//! The engine calls into these traits but never depends on how they are
//! implemented. Every trait has a silent implementation, and each is also
//! implemented for `Rc<RefCell<T>>` so a caller can keep a handle and inspect
//! the collaborator once the battle is over.

use crate::creature::Creature;
use crate::errors::AudioError;
use std::cell::RefCell;
use std::rc::Rc;

/// Battle log lines shown to the user.
pub trait MessageSink {
    fn message(&mut self, text: &str);
}

/// Achievement-style notifications.
pub trait Notifier {
    fn notify(&mut self, title: &str, category: &str, body: &str);
}

/// Fire-and-forget audio cues. Failures are logged by the engine and never abort a battle.
pub trait AudioSink {
    fn play(&mut self, track_id: &str) -> Result<(), AudioError>;

    /// The track playing before the battle started, restored when it ends.
    fn current_track(&self) -> Option<String> {
        None
    }
}

/// Per-creature battle statistics. Called exactly once per battle outcome.
pub trait StatsRecorder {
    fn record_battle(&mut self, creature: &Creature, did_win: bool);
    fn record_ran_away(&mut self, creature: &Creature);
}

/// Level-up consequences owned by the content layer.
pub trait ProgressionHooks {
    /// Teaches the creature whatever its species learns at its current level.
    /// Returns the names of the attacks learned.
    fn learn_attack(&mut self, creature: &mut Creature) -> Vec<String>;

    /// Evolves the creature if its species evolves at its current level.
    /// Returns the `(from, into)` display names.
    fn evolve(&mut self, creature: &mut Creature) -> Option<(String, String)>;
}

/// Does nothing. The default for every collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl MessageSink for Silent {
    fn message(&mut self, _text: &str) {}
}

impl Notifier for Silent {
    fn notify(&mut self, _title: &str, _category: &str, _body: &str) {}
}

impl AudioSink for Silent {
    fn play(&mut self, _track_id: &str) -> Result<(), AudioError> {
        Ok(())
    }
}

impl StatsRecorder for Silent {
    fn record_battle(&mut self, _creature: &Creature, _did_win: bool) {}
    fn record_ran_away(&mut self, _creature: &Creature) {}
}

impl ProgressionHooks for Silent {
    fn learn_attack(&mut self, _creature: &mut Creature) -> Vec<String> {
        Vec::new()
    }

    fn evolve(&mut self, _creature: &mut Creature) -> Option<(String, String)> {
        None
    }
}

/// Keeps every message in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    pub lines: Vec<String>,
}

impl MessageSink for MessageLog {
    fn message(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}

/// Keeps every notification in memory as `(title, category, body)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationLog {
    pub notifications: Vec<(String, String, String)>,
}

impl Notifier for NotificationLog {
    fn notify(&mut self, title: &str, category: &str, body: &str) {
        self.notifications
            .push((title.to_string(), category.to_string(), body.to_string()));
    }
}

/// Remembers which tracks were requested, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackLog {
    pub playing: Option<String>,
    pub played: Vec<String>,
}

impl AudioSink for TrackLog {
    fn play(&mut self, track_id: &str) -> Result<(), AudioError> {
        self.playing = Some(track_id.to_string());
        self.played.push(track_id.to_string());
        Ok(())
    }

    fn current_track(&self) -> Option<String> {
        self.playing.clone()
    }
}

impl<T: MessageSink> MessageSink for Rc<RefCell<T>> {
    fn message(&mut self, text: &str) {
        self.borrow_mut().message(text);
    }
}

impl<T: Notifier> Notifier for Rc<RefCell<T>> {
    fn notify(&mut self, title: &str, category: &str, body: &str) {
        self.borrow_mut().notify(title, category, body);
    }
}

impl<T: AudioSink> AudioSink for Rc<RefCell<T>> {
    fn play(&mut self, track_id: &str) -> Result<(), AudioError> {
        self.borrow_mut().play(track_id)
    }

    fn current_track(&self) -> Option<String> {
        self.borrow().current_track()
    }
}

impl<T: StatsRecorder> StatsRecorder for Rc<RefCell<T>> {
    fn record_battle(&mut self, creature: &Creature, did_win: bool) {
        self.borrow_mut().record_battle(creature, did_win);
    }

    fn record_ran_away(&mut self, creature: &Creature) {
        self.borrow_mut().record_ran_away(creature);
    }
}

impl<T: ProgressionHooks> ProgressionHooks for Rc<RefCell<T>> {
    fn learn_attack(&mut self, creature: &mut Creature) -> Vec<String> {
        self.borrow_mut().learn_attack(creature)
    }

    fn evolve(&mut self, creature: &mut Creature) -> Option<(String, String)> {
        self.borrow_mut().evolve(creature)
    }
}

/// The full set of collaborators a `BattleEngine` drives.
pub struct Collaborators {
    pub messages: Box<dyn MessageSink>,
    pub notifier: Box<dyn Notifier>,
    pub audio: Box<dyn AudioSink>,
    pub stats: Box<dyn StatsRecorder>,
    pub progression: Box<dyn ProgressionHooks>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            messages: Box::new(Silent),
            notifier: Box::new(Silent),
            audio: Box::new(Silent),
            stats: Box::new(Silent),
            progression: Box::new(Silent),
        }
    }
}

impl Collaborators {
    pub fn with_messages(mut self, messages: impl MessageSink + 'static) -> Self {
        self.messages = Box::new(messages);
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn with_audio(mut self, audio: impl AudioSink + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    pub fn with_stats(mut self, stats: impl StatsRecorder + 'static) -> Self {
        self.stats = Box::new(stats);
        self
    }

    pub fn with_progression(mut self, progression: impl ProgressionHooks + 'static) -> Self {
        self.progression = Box::new(progression);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shared_handle_sees_what_the_engine_wrote() {
        let log = Rc::new(RefCell::new(MessageLog::default()));
        let mut sink: Box<dyn MessageSink> = Box::new(Rc::clone(&log));

        sink.message("Mossling used Tackle!");

        assert_eq!(log.borrow().lines, vec!["Mossling used Tackle!".to_string()]);
    }

    #[test]
    fn test_track_log_reports_current_track() {
        let mut audio = TrackLog::default();
        assert_eq!(audio.current_track(), None);

        audio.play("town").unwrap();
        audio.play("battle_loop").unwrap();

        assert_eq!(audio.current_track().as_deref(), Some("battle_loop"));
        assert_eq!(audio.played, vec!["town".to_string(), "battle_loop".to_string()]);
    }
}
