//! Application Configuration

use platform::env::env_parse;

/// Longest period a single payment may default to (ten years)
const MAX_SUBSCRIPTION_DAYS: i64 = 3650;

/// Billing application configuration
#[derive(Debug, Clone)]
pub struct BillingConfig {
    /// Monthly subscription price of one child
    pub price_per_child: i64,
    /// Paid period when a request names no end date
    pub default_subscription_days: i64,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            price_per_child: 9900,
            default_subscription_days: 30,
        }
    }
}

impl BillingConfig {
    /// `PRICE_PER_CHILD` and `DEFAULT_SUBSCRIPTION_DAYS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            price_per_child: env_parse("PRICE_PER_CHILD")
                .filter(|p: &i64| *p >= 0)
                .unwrap_or(defaults.price_per_child),
            default_subscription_days: subscription_days(env_parse("DEFAULT_SUBSCRIPTION_DAYS"))
                .unwrap_or(defaults.default_subscription_days),
        }
    }
}

fn subscription_days(raw: Option<i64>) -> Option<i64> {
    raw.filter(|d| *d > 0).map(|d| d.min(MAX_SUBSCRIPTION_DAYS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_days_bounds() {
        assert_eq!(subscription_days(Some(30)), Some(30));
        assert_eq!(subscription_days(Some(0)), None);
        assert_eq!(subscription_days(Some(-5)), None);
        assert_eq!(subscription_days(Some(i64::MAX)), Some(MAX_SUBSCRIPTION_DAYS));
        assert_eq!(subscription_days(None), None);
    }
}
