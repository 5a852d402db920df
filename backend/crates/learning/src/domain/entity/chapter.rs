use chrono::{DateTime, Utc};

use crate::domain::value_object::ChapterId;

/// Curriculum unit. Unique per (`grade_level`, `chapter_order`).
#[derive(Debug, Clone)]
pub struct Chapter {
    pub chapter_id: ChapterId,
    /// 1..=6 elementary, 7..=9 middle school
    pub grade_level: i32,
    pub chapter_order: i32,
    pub chapter_name: String,
    pub chapter_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chapter {
    pub fn new(
        grade_level: i32,
        chapter_order: i32,
        chapter_name: String,
        chapter_description: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            chapter_id: ChapterId::new(),
            grade_level,
            chapter_order,
            chapter_name,
            chapter_description,
            created_at: now,
            updated_at: now,
        }
    }
}
