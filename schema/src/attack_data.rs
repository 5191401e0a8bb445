use crate::EffectKind;
use serde::{Deserialize, Serialize};

/// How an attack turns attacker/defender state into lost hit points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Damage {
    /// Always removes exactly this many hit points.
    Fixed(u16),
    /// `round(attacker.attack * factor / max(1, defender.defense))`.
    Scaled { factor: f32 },
    /// Status-only attack.
    Status,
}

/// An effect an attack may leave on its target, with a percent chance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Infliction {
    pub effect: EffectKind,
    pub chance: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub damage: Damage,
    /// Percent chance to connect. 100 never consumes a draw.
    #[serde(default = "default_accuracy")]
    pub accuracy: u8,
    pub max_ap: u8,
    #[serde(default)]
    pub inflicts: Option<Infliction>,
}

fn default_accuracy() -> u8 {
    100
}

impl AttackData {
    /// Convenience constructor for fixed-damage attacks that always hit.
    pub fn fixed(name: &str, damage: u16, max_ap: u8) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            damage: Damage::Fixed(damage),
            accuracy: 100,
            max_ap,
            inflicts: None,
        }
    }

    pub fn is_damaging(&self) -> bool {
        !matches!(self.damage, Damage::Status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attack_data_parses_from_ron_with_defaults() {
        let source = r#"(
            name: "Ember",
            damage: Scaled(factor: 1.5),
            max_ap: 20,
            inflicts: Some((effect: Burning, chance: 10)),
        )"#;

        let attack: AttackData = ron::from_str(source).unwrap();

        assert_eq!(attack.name, "Ember");
        assert_eq!(attack.accuracy, 100);
        assert_eq!(attack.damage, Damage::Scaled { factor: 1.5 });
        assert_eq!(
            attack.inflicts,
            Some(Infliction {
                effect: EffectKind::Burning,
                chance: 10
            })
        );
    }
}
