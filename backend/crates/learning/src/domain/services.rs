//! Domain services
//!
//! Reward draw for correct answers.

use rand::Rng;

/// Candy drawn for a correct answer.
///
/// With probability `zero_probability` nothing is won, otherwise the reward is
/// uniform in `1..=max_candy`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardPolicy {
    pub zero_probability: f64,
    pub max_candy: i64,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            zero_probability: 0.8,
            max_candy: 200,
        }
    }
}

impl RewardPolicy {
    /// Clamp to a drawable policy
    pub fn new(zero_probability: f64, max_candy: i64) -> Self {
        let zero_probability = if zero_probability.is_finite() {
            zero_probability.clamp(0.0, 1.0)
        } else {
            Self::default().zero_probability
        };
        Self {
            zero_probability,
            max_candy: max_candy.max(1),
        }
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        if rng.random::<f64>() < self.zero_probability {
            0
        } else {
            rng.random_range(1..=self.max_candy)
        }
    }
}
