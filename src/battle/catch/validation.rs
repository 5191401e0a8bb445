use crate::combatant::Combatant;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum CatchError {
    /// Only wild creatures can be caught.
    #[error("You can't do that in a duel!")]
    NotCapturable,
    /// No active creature on the opposing side
    #[error("There is nothing to catch!")]
    NoTarget,
    /// Target creature is already fainted
    #[error("{0} can't be caught anymore!")]
    TargetFainted(String),
}

/// Validate if `thrower` may throw a ball at the opposing active creature.
pub fn can_attempt_catch(combatants: &[Combatant; 2], thrower: usize) -> Result<(), CatchError> {
    let opponent = &combatants[1 - thrower];

    if !opponent.is_capturable() {
        return Err(CatchError::NotCapturable);
    }

    match opponent.active() {
        Some(target) if target.is_fainted() => Err(CatchError::TargetFainted(target.name.clone())),
        Some(_) => Ok(()),
        None => Err(CatchError::NoTarget),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::TestCreatureBuilder;
    use pretty_assertions::assert_eq;

    fn pair(opponent: Combatant) -> [Combatant; 2] {
        let player = Combatant::player("Ash", vec![TestCreatureBuilder::new("Rocklet").build()]);
        [player, opponent]
    }

    #[test]
    fn test_trainer_creatures_cannot_be_caught() {
        let trainer = Combatant::trainer("Ace", vec![TestCreatureBuilder::new("Mossling").build()]);
        assert_eq!(can_attempt_catch(&pair(trainer), 0), Err(CatchError::NotCapturable));
    }

    #[test]
    fn test_wild_creature_can_be_caught() {
        let wild = Combatant::wild(TestCreatureBuilder::new("Mossling").build());
        assert_eq!(can_attempt_catch(&pair(wild), 0), Ok(()));
    }

    #[test]
    fn test_fainted_target_is_rejected() {
        let wild = Combatant::wild(TestCreatureBuilder::new("Mossling").with_hp(0).build());
        assert_eq!(
            can_attempt_catch(&pair(wild), 0),
            Err(CatchError::TargetFainted("Mossling".to_string()))
        );
    }

    #[test]
    fn test_wild_side_cannot_catch_the_player() {
        let wild = Combatant::wild(TestCreatureBuilder::new("Mossling").build());
        assert_eq!(can_attempt_catch(&pair(wild), 1), Err(CatchError::NotCapturable));
    }
}
