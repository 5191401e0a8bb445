use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString, IntoStaticStr};

/// Capture devices. Each carries the weight multiplied into the catch draw.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
    EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum BallKind {
    Standard,
    Super,
    Hyper,
}

impl BallKind {
    pub fn chance_weight(self) -> f64 {
        match self {
            BallKind::Standard => 1.0,
            BallKind::Super => 6.0,
            BallKind::Hyper => 1000.0,
        }
    }
}

impl fmt::Display for BallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BallKind::Standard => write!(f, "Standard Ball"),
            BallKind::Super => write!(f, "Super Ball"),
            BallKind::Hyper => write!(f, "Hyper Ball"),
        }
    }
}

/// What using an item does once it has been taken from the inventory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemEffect {
    Heal(u16),
    RestoreAp,
    Capture(BallKind),
}

/// Consumable items usable during a battle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
    EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum ItemKind {
    HealingPotion,
    SuperPotion,
    ApPotion,
    StandardBall,
    SuperBall,
    HyperBall,
}

impl ItemKind {
    pub fn effect(self) -> ItemEffect {
        match self {
            ItemKind::HealingPotion => ItemEffect::Heal(5),
            ItemKind::SuperPotion => ItemEffect::Heal(15),
            ItemKind::ApPotion => ItemEffect::RestoreAp,
            ItemKind::StandardBall => ItemEffect::Capture(BallKind::Standard),
            ItemKind::SuperBall => ItemEffect::Capture(BallKind::Super),
            ItemKind::HyperBall => ItemEffect::Capture(BallKind::Hyper),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            ItemKind::HealingPotion => "Healing Potion",
            ItemKind::SuperPotion => "Super Potion",
            ItemKind::ApPotion => "AP Potion",
            ItemKind::StandardBall => "Standard Ball",
            ItemKind::SuperBall => "Super Ball",
            ItemKind::HyperBall => "Hyper Ball",
        };
        write!(f, "{}", display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_heal_tiers() {
        assert_eq!(ItemKind::HealingPotion.effect(), ItemEffect::Heal(5));
        assert_eq!(ItemKind::SuperPotion.effect(), ItemEffect::Heal(15));
    }

    #[test]
    fn test_only_balls_capture() {
        let capture: Vec<ItemKind> = ItemKind::iter()
            .filter(|item| matches!(item.effect(), ItemEffect::Capture(_)))
            .collect();
        assert_eq!(
            capture,
            vec![ItemKind::StandardBall, ItemKind::SuperBall, ItemKind::HyperBall]
        );
    }

    #[test]
    fn test_ball_weights_are_ordered() {
        assert!(BallKind::Standard.chance_weight() < BallKind::Super.chance_weight());
        assert_eq!(BallKind::Hyper.chance_weight(), 1000.0);
    }

    #[test]
    fn test_item_names_parse() {
        assert_eq!(ItemKind::from_str("ap_potion"), Ok(ItemKind::ApPotion));
        assert!(ItemKind::from_str("elixir").is_err());
    }
}
