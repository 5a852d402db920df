use serde::{Deserialize, Serialize};

/// How urgently a weak area needs work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Below 50% is high, below 70% medium, anything else low.
    pub fn from_accuracy(accuracy_rate: f64) -> Self {
        if accuracy_rate < 50.0 {
            Priority::High
        } else if accuracy_rate < 70.0 {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_bands() {
        assert_eq!(Priority::from_accuracy(0.0), Priority::High);
        assert_eq!(Priority::from_accuracy(49.99), Priority::High);
        assert_eq!(Priority::from_accuracy(50.0), Priority::Medium);
        assert_eq!(Priority::from_accuracy(69.99), Priority::Medium);
        assert_eq!(Priority::from_accuracy(70.0), Priority::Low);
        assert_eq!(Priority::from_accuracy(100.0), Priority::Low);
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!(Priority::parse("HIGH"), Some(Priority::High));
        assert_eq!(Priority::parse(" low "), Some(Priority::Low));
        assert_eq!(Priority::parse("urgent"), None);
    }
}
