//! Per-creature battle statistics.

use crate::creature::Creature;
use crate::hooks::StatsRecorder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreatureRecord {
    pub battles: u32,
    pub wins: u32,
    pub losses: u32,
    pub ran_away: u32,
}

/// Stats recorder keyed by creature name. Serializable so a caller can persist it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BattleLedger {
    records: BTreeMap<String, CreatureRecord>,
}

impl BattleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &str) -> CreatureRecord {
        self.records.get(name).copied().unwrap_or_default()
    }

    /// Total outcomes recorded across every creature.
    pub fn total_outcomes(&self) -> u32 {
        self.records
            .values()
            .map(|record| record.battles + record.ran_away)
            .sum()
    }
}

impl StatsRecorder for BattleLedger {
    fn record_battle(&mut self, creature: &Creature, did_win: bool) {
        let record = self.records.entry(creature.name.clone()).or_default();
        record.battles += 1;
        if did_win {
            record.wins += 1;
        } else {
            record.losses += 1;
        }
    }

    fn record_ran_away(&mut self, creature: &Creature) {
        self.records.entry(creature.name.clone()).or_default().ran_away += 1;
    }
}
