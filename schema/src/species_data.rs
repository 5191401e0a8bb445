use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub initiative: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionData {
    pub evolves_into: String, // Species identifier
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_stats: BaseStats,
    /// XP handed to the winner when a unit of this species is on the losing roster.
    pub lose_xp: u32,
    /// Attack identifiers every fresh instance starts with (at most 4 are used).
    pub attacks: Vec<String>,
    /// level -> attack identifier learned on reaching it
    #[serde(default)]
    pub learnset: Vec<(u32, String)>,
    #[serde(default)]
    pub evolution_data: Option<EvolutionData>,
}

impl SpeciesData {
    /// Every learnset attack available at or below `level`.
    pub fn learnable_up_to(&self, level: u32) -> impl Iterator<Item = &str> {
        self.learnset
            .iter()
            .filter(move |(learn_level, _)| *learn_level <= level)
            .map(|(_, attack)| attack.as_str())
    }

    /// Returns the species to evolve into once `level` has been reached.
    pub fn evolution_at(&self, level: u32) -> Option<&str> {
        self.evolution_data
            .as_ref()
            .filter(|evolution| level >= evolution.level)
            .map(|evolution| evolution.evolves_into.as_str())
    }
}
