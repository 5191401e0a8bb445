//! Read-only creature and attack definitions.

use crate::creature::{AttackSlot, Creature};
use crate::errors::{ContentError, ContentResult};
use schema::{AttackData, SpeciesData};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const BUNDLED_CONTENT: &str = include_str!("../data/content.ron");

/// Definitions keyed by identifier. The engine only ever reads them.
pub trait ContentProvider {
    fn species(&self, id: &str) -> ContentResult<&SpeciesData>;
    fn attack(&self, id: &str) -> ContentResult<&AttackData>;
    fn species_ids(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentLibrary {
    #[serde(default)]
    attacks: BTreeMap<String, AttackData>,
    #[serde(default)]
    species: BTreeMap<String, SpeciesData>,
}

impl ContentLibrary {
    pub fn from_ron_str(source: &str) -> ContentResult<Self> {
        let library: ContentLibrary =
            ron::from_str(source).map_err(|e| ContentError::MalformedData(e.to_string()))?;
        library.validate()?;
        Ok(library)
    }

    pub fn load(path: &Path) -> ContentResult<Self> {
        let source = fs::read_to_string(path)
            .map_err(|e| ContentError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_ron_str(&source)
    }

    /// The demo content shipped with the crate.
    pub fn bundled() -> ContentResult<Self> {
        Self::from_ron_str(BUNDLED_CONTENT)
    }

    /// Every identifier a species refers to must resolve.
    fn validate(&self) -> ContentResult<()> {
        for (id, species) in &self.species {
            if species.attacks.is_empty() {
                return Err(ContentError::NoAttacks(id.clone()));
            }
            let learned = species.learnset.iter().map(|(_, attack)| attack);
            for attack in species.attacks.iter().chain(learned) {
                self.attack(attack)?;
            }
            if let Some(evolution) = &species.evolution_data {
                self.species(&evolution.evolves_into)?;
            }
        }
        Ok(())
    }

    pub fn attack_slot(&self, id: &str) -> ContentResult<AttackSlot> {
        Ok(AttackSlot::new(id, self.attack(id)?.clone()))
    }

    /// Builds a fresh creature of `species_id` at `level` with full hp and AP.
    pub fn instantiate(&self, species_id: &str, level: u32) -> ContentResult<Creature> {
        let data = self.species(species_id)?;
        let attacks = data
            .attacks
            .iter()
            .map(|id| self.attack_slot(id))
            .collect::<ContentResult<Vec<_>>>()?;

        Ok(Creature::new(species_id, data, level, attacks))
    }
}

impl ContentProvider for ContentLibrary {
    fn species(&self, id: &str) -> ContentResult<&SpeciesData> {
        self.species
            .get(id)
            .ok_or_else(|| ContentError::SpeciesNotFound(id.to_string()))
    }

    fn attack(&self, id: &str) -> ContentResult<&AttackData> {
        self.attacks
            .get(id)
            .ok_or_else(|| ContentError::AttackNotFound(id.to_string()))
    }

    fn species_ids(&self) -> Vec<String> {
        self.species.keys().cloned().collect()
    }
}
