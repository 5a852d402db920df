//! Application Configuration

use platform::env::env_parse;

use crate::domain::services::RewardPolicy;

/// Learning application configuration
#[derive(Debug, Clone, Default)]
pub struct LearningConfig {
    /// Candy drawn for correct answers
    pub reward: RewardPolicy,
}

impl LearningConfig {
    /// `REWARD_ZERO_PROBABILITY` and `REWARD_MAX_CANDY`
    pub fn from_env() -> Self {
        let defaults = RewardPolicy::default();
        Self {
            reward: RewardPolicy::new(
                env_parse("REWARD_ZERO_PROBABILITY").unwrap_or(defaults.zero_probability),
                env_parse("REWARD_MAX_CANDY").unwrap_or(defaults.max_candy),
            ),
        }
    }

    pub fn with_reward(reward: RewardPolicy) -> Self {
        Self { reward }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LearningConfig::default();
        assert_eq!(config.reward.zero_probability, 0.8);
        assert_eq!(config.reward.max_candy, 200);
    }
}
