use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{ChapterId, Priority, ReportSource, UserId, WeaknessReportId};

/// A weak area found in a learner's attempts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weakness {
    pub category: String,
    pub chapter_id: Option<ChapterId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_name: Option<String>,
    /// Wrong answers in this area
    pub problem_count: u32,
    pub accuracy_rate: f64,
    pub common_mistakes: Vec<String>,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeaknessAnalysis {
    pub weaknesses: Vec<Weakness>,
    pub recommendations: Vec<String>,
    pub overall_score: f64,
    pub improvement_areas: Vec<String>,
    pub source: ReportSource,
}

/// Stored analysis
#[derive(Debug, Clone)]
pub struct WeaknessReport {
    pub report_id: WeaknessReportId,
    pub user_id: UserId,
    pub analysis: WeaknessAnalysis,
    pub created_at: DateTime<Utc>,
}

impl WeaknessReport {
    pub fn new(user_id: UserId, analysis: WeaknessAnalysis) -> Self {
        Self {
            report_id: WeaknessReportId::new(),
            user_id,
            analysis,
            created_at: Utc::now(),
        }
    }
}
