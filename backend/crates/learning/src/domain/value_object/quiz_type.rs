use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Answer format of a quiz question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum QuizType {
    #[display("multiple_choice")]
    MultipleChoice = 0,
    #[display("short_answer")]
    ShortAnswer = 1,
}

impl QuizType {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(QuizType::MultipleChoice),
            1 => Some(QuizType::ShortAnswer),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_type_ids() {
        assert_eq!(QuizType::from_id(0), Some(QuizType::MultipleChoice));
        assert_eq!(QuizType::from_id(1), Some(QuizType::ShortAnswer));
        assert_eq!(QuizType::from_id(7), None);
    }

    #[test]
    fn test_quiz_type_serde() {
        assert_eq!(
            serde_json::to_string(&QuizType::MultipleChoice).unwrap(),
            r#""multiple_choice""#
        );
        let parsed: QuizType = serde_json::from_str(r#""short_answer""#).unwrap();
        assert_eq!(parsed, QuizType::ShortAnswer);
    }
}
