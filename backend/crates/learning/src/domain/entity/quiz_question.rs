use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::value_object::{ChapterId, QuizId, QuizType};

/// A question of a chapter.
///
/// `question` is free-form JSON authored by operators; it usually carries a
/// `text` or `title` field.
#[derive(Debug, Clone)]
pub struct QuizQuestion {
    pub quiz_id: QuizId,
    pub grade: i32,
    pub quiz_type: QuizType,
    pub chapter_id: ChapterId,
    pub question: Value,
    pub choices: Option<Vec<String>>,
    pub answer: String,
    pub explanation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuizQuestion {
    pub fn new(
        grade: i32,
        quiz_type: QuizType,
        chapter_id: ChapterId,
        question: Value,
        choices: Option<Vec<String>>,
        answer: String,
        explanation: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            quiz_id: QuizId::new(),
            grade,
            quiz_type,
            chapter_id,
            question,
            choices,
            answer,
            explanation,
            created_at: now,
            updated_at: now,
        }
    }

    /// Answers match after trimming surrounding whitespace
    pub fn is_correct(&self, submitted: &str) -> bool {
        self.answer.trim() == submitted.trim()
    }

    pub fn title(&self) -> String {
        question_title(&self.question)
    }
}

/// Display text of a question document: `text`, else `title`, else the JSON itself.
pub fn question_title(question: &Value) -> String {
    match question {
        Value::Null => "Untitled".to_string(),
        Value::String(s) if s.trim().is_empty() => "Untitled".to_string(),
        Value::String(s) => s.clone(),
        Value::Object(map) => ["text", "title"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| question.to_string()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_question_title_prefers_text() {
        assert_eq!(question_title(&json!({"text": "1 + 1 = ?", "title": "Add"})), "1 + 1 = ?");
        assert_eq!(question_title(&json!({"title": "Add"})), "Add");
        assert_eq!(question_title(&json!("plain")), "plain");
        assert_eq!(question_title(&Value::Null), "Untitled");
        assert_eq!(question_title(&json!({"image": "a.png"})), r#"{"image":"a.png"}"#);
    }

    #[test]
    fn test_is_correct_trims() {
        let quiz = QuizQuestion::new(
            1,
            QuizType::ShortAnswer,
            ChapterId::new(),
            json!({"text": "2 x 3"}),
            None,
            " 6".into(),
            None,
        );
        assert!(quiz.is_correct("6 "));
        assert!(!quiz.is_correct("5"));
    }
}
