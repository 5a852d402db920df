//! Weakness analysis rules
//!
//! Statistics over a learner's attempts, the deterministic fallback analysis,
//! and tolerant reading of language-model output. No I/O.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::domain::entity::{AttemptDetail, Weakness, WeaknessAnalysis};
use crate::domain::value_object::{ChapterId, Priority, QuizType, ReportSource};

const NO_ATTEMPTS: &str = "No quiz attempts yet. Try solving some problems!";
const KEEP_GOING: &str = "Keep up the effort!";
const MAX_COMMON_MISTAKES: usize = 3;

/// Round to two decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn percent(part: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(total) * 100.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttemptStatistics {
    pub total_attempts: u32,
    pub correct_count: u32,
    pub wrong_count: u32,
    /// Percent, two decimals
    pub accuracy_rate: f64,
    /// Wrong answers per chapter name
    pub wrong_by_chapter: BTreeMap<String, u32>,
    pub wrong_by_type: BTreeMap<QuizType, u32>,
}

impl AttemptStatistics {
    pub fn from_attempts(attempts: &[AttemptDetail]) -> Self {
        let total_attempts = attempts.len() as u32;
        let correct_count = attempts.iter().filter(|a| a.attempt.is_correct).count() as u32;

        let mut wrong_by_chapter = BTreeMap::new();
        let mut wrong_by_type = BTreeMap::new();
        for wrong in attempts.iter().filter(|a| !a.attempt.is_correct) {
            *wrong_by_chapter.entry(wrong.chapter_name.clone()).or_insert(0) += 1;
            *wrong_by_type.entry(wrong.quiz_type).or_insert(0) += 1;
        }

        Self {
            total_attempts,
            correct_count,
            wrong_count: total_attempts - correct_count,
            accuracy_rate: round2(percent(correct_count, total_attempts)),
            wrong_by_chapter,
            wrong_by_type,
        }
    }
}

/// Attempts of one chapter
#[derive(Debug)]
pub struct ChapterTally<'a> {
    pub chapter_id: ChapterId,
    pub chapter_name: &'a str,
    pub total: u32,
    pub correct: u32,
    pub wrong: Vec<&'a AttemptDetail>,
}

impl ChapterTally<'_> {
    pub fn accuracy(&self) -> f64 {
        percent(self.correct, self.total)
    }
}

/// Per-chapter tallies ordered by chapter name
pub fn tally_by_chapter(attempts: &[AttemptDetail]) -> Vec<ChapterTally<'_>> {
    let mut index: HashMap<ChapterId, usize> = HashMap::new();
    let mut tallies: Vec<ChapterTally<'_>> = Vec::new();

    for detail in attempts {
        let slot = *index.entry(detail.chapter_id).or_insert_with(|| {
            tallies.push(ChapterTally {
                chapter_id: detail.chapter_id,
                chapter_name: &detail.chapter_name,
                total: 0,
                correct: 0,
                wrong: Vec::new(),
            });
            tallies.len() - 1
        });

        let tally = &mut tallies[slot];
        tally.total += 1;
        if detail.attempt.is_correct {
            tally.correct += 1;
        } else {
            tally.wrong.push(detail);
        }
    }

    tallies.sort_by(|a, b| a.chapter_name.cmp(b.chapter_name));
    tallies
}

/// Response for a learner without attempts
pub fn empty_analysis() -> WeaknessAnalysis {
    WeaknessAnalysis {
        weaknesses: Vec::new(),
        recommendations: vec![NO_ATTEMPTS.to_string()],
        overall_score: 0.0,
        improvement_areas: Vec::new(),
        source: ReportSource::Fallback,
    }
}

/// Analysis computed from the attempts alone
pub fn fallback_analysis(
    attempts: &[AttemptDetail],
    stats: &AttemptStatistics,
) -> WeaknessAnalysis {
    let mut weaknesses: Vec<Weakness> = tally_by_chapter(attempts)
        .into_iter()
        .map(|tally| {
            let accuracy = tally.accuracy();
            Weakness {
                category: tally.chapter_name.to_string(),
                chapter_id: Some(tally.chapter_id),
                chapter_name: Some(tally.chapter_name.to_string()),
                problem_count: tally.wrong.len() as u32,
                accuracy_rate: round2(accuracy),
                common_mistakes: tally
                    .wrong
                    .iter()
                    .filter_map(|a| a.explanation.as_deref())
                    .filter(|e| !e.trim().is_empty())
                    .take(MAX_COMMON_MISTAKES)
                    .map(str::to_string)
                    .collect(),
                priority: Priority::from_accuracy(accuracy),
            }
        })
        .collect();

    weaknesses.sort_by(|a, b| a.accuracy_rate.total_cmp(&b.accuracy_rate));

    let mut recommendations = vec![
        if stats.accuracy_rate >= 80.0 {
            "Great results overall. Keep it up!"
        } else if stats.accuracy_rate >= 60.0 {
            "Steady, regular practice is needed."
        } else {
            "Focus on building a solid foundation first."
        }
        .to_string(),
    ];

    let improvement_areas: Vec<String> = weaknesses
        .iter()
        .filter(|w| w.priority == Priority::High)
        .map(|w| w.category.clone())
        .collect();

    if let Some(first) = improvement_areas.first() {
        recommendations.push(format!("More practice is needed on {first}."));
    }

    WeaknessAnalysis {
        weaknesses,
        recommendations,
        overall_score: stats.accuracy_rate,
        improvement_areas,
        source: ReportSource::Fallback,
    }
}

// ============================================================================
// Model output
// ============================================================================

fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

fn strings(value: Option<&Value>) -> Option<Vec<String>> {
    value.and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    })
}

fn chapter_id(value: Option<&Value>) -> Option<ChapterId> {
    value
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<uuid::Uuid>().ok())
        .map(ChapterId::from_uuid)
}

fn weakness(value: &Value) -> Weakness {
    Weakness {
        category: text(value.get("category")).unwrap_or_default(),
        chapter_id: chapter_id(value.get("chapterId")),
        chapter_name: text(value.get("chapterName")),
        problem_count: number(value.get("problemCount"))
            .filter(|n| *n >= 0.0)
            .map(|n| n as u32)
            .unwrap_or(0),
        accuracy_rate: number(value.get("accuracyRate")).unwrap_or(0.0),
        common_mistakes: strings(value.get("commonMistakes")).unwrap_or_default(),
        priority: value
            .get("priority")
            .and_then(Value::as_str)
            .and_then(Priority::parse)
            .unwrap_or(Priority::Medium),
    }
}

/// Read a model response, filling gaps with defaults.
///
/// `default_score` is used when `overallScore` is missing or not numeric.
pub fn parse_model_analysis(value: &Value, default_score: f64) -> WeaknessAnalysis {
    let weaknesses = value
        .get("weaknesses")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(weakness).collect())
        .unwrap_or_default();

    WeaknessAnalysis {
        weaknesses,
        recommendations: strings(value.get("recommendations"))
            .unwrap_or_else(|| vec![KEEP_GOING.to_string()]),
        overall_score: number(value.get("overallScore")).unwrap_or(default_score),
        improvement_areas: strings(value.get("improvementAreas")).unwrap_or_default(),
        source: ReportSource::Llm,
    }
}
