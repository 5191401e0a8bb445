//! Achievement-style milestones unlocked by battle outcomes.

use crate::hooks::Notifier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const FIRST_DUEL: &str = "first_duel";
pub const FIRST_CATCH: &str = "first_catch";
pub const CATCH_EM_ALL: &str = "catch_em_all";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl Milestone {
    pub fn new(id: &str, title: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// Known milestones and the ones already achieved.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Milestones {
    known: Vec<Milestone>,
    achieved: BTreeSet<String>,
}

impl Default for Milestones {
    fn default() -> Self {
        Self {
            known: vec![
                Milestone::new(FIRST_DUEL, "First duel", "Win your first duel against a trainer"),
                Milestone::new(FIRST_CATCH, "First catch", "Catch your first creature"),
                Milestone::new(CATCH_EM_ALL, "Catch them all", "Catch every species there is"),
            ],
            achieved: BTreeSet::new(),
        }
    }
}

impl Milestones {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores previously achieved milestones, e.g. from a save file.
    pub fn with_achieved<I, S>(mut self, achieved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.achieved.extend(achieved.into_iter().map(Into::into));
        self
    }

    pub fn is_achieved(&self, id: &str) -> bool {
        self.achieved.contains(id)
    }

    pub fn achieved(&self) -> impl Iterator<Item = &str> {
        self.achieved.iter().map(String::as_str)
    }

    /// Marks `id` as achieved and notifies the first time only.
    /// Returns true if this call unlocked it.
    pub fn achieve(&mut self, id: &str, notifier: &mut dyn Notifier) -> bool {
        let Some(milestone) = self.known.iter().find(|m| m.id == id) else {
            tracing::warn!(id, "unknown milestone");
            return false;
        };
        if !self.achieved.insert(id.to_string()) {
            return false;
        }

        tracing::info!(id, "milestone unlocked");
        notifier.notify(&milestone.title, "Achievement unlocked!", &milestone.description);
        true
    }
}
