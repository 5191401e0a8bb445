use crate::battle::state::BattleRng;
use crate::creature::Creature;
use schema::BallKind;

/// The two sides of the weighted catch draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatchWeights {
    pub catch: f64,
    pub miss: f64,
}

impl CatchWeights {
    /// Chance of the draw landing on `catch`, for display and tests.
    pub fn probability(&self) -> f64 {
        let total = self.catch + self.miss;
        if total <= 0.0 {
            0.0
        } else {
            self.catch / total
        }
    }
}

/// Environment bonus plus the catch bonus of every effect on the target.
pub fn catch_bonus(target: &Creature, in_wild_zone: bool, wild_zone_bonus: f64) -> f64 {
    let environment = if in_wild_zone { wild_zone_bonus } else { 0.0 };
    environment + target.effect_catch_bonus()
}

/// `catch ∝ (full_hp / hp) * ball weight + bonus`, `miss ∝ full_hp`.
///
/// The target is never fainted when a ball is thrown; hp is floored at 1 so the
/// weights stay finite regardless.
pub fn catch_weights(target: &Creature, ball: BallKind, bonus: f64) -> CatchWeights {
    let full_hp = f64::from(target.full_hp);
    let hp = f64::from(target.hp.max(1));

    CatchWeights {
        catch: (full_hp / hp * ball.chance_weight() + bonus).max(0.0),
        miss: full_hp,
    }
}

/// Roll the weighted draw. Returns true if the catch succeeds.
pub fn roll_catch(weights: &CatchWeights, rng: &mut BattleRng) -> bool {
    let roll = rng.next_fraction("catch roll") * (weights.catch + weights.miss);
    roll < weights.catch
}
