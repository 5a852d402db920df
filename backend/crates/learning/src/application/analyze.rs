//! Analyze Weakness Use Case
//!
//! Asks the language model for a weakness analysis of a learner's attempts
//! and falls back to a statistics-only analysis when the model fails.
//! Every result is stored as a report.

use std::sync::Arc;

use platform::llm::LanguageModel;

use crate::domain::analysis::{
    AttemptStatistics, empty_analysis, fallback_analysis, parse_model_analysis, tally_by_chapter,
};
use crate::domain::entity::{AttemptDetail, WeaknessAnalysis, WeaknessReport};
use crate::domain::repository::{QuizRepository, ReportRepository};
use crate::domain::value_object::UserId;
use crate::error::LearningResult;

const SYSTEM_PROMPT: &str = "You are a mathematics education expert. Analyze a student's \
quiz attempts, identify weaknesses, and give personalised study recommendations. \
Always answer with a single JSON object.";

pub struct AnalyzeWeaknessUseCase<R, L>
where
    R: QuizRepository + ReportRepository,
    L: LanguageModel,
{
    repo: Arc<R>,
    llm: Arc<L>,
}

impl<R, L> AnalyzeWeaknessUseCase<R, L>
where
    R: QuizRepository + ReportRepository,
    L: LanguageModel,
{
    pub fn new(repo: Arc<R>, llm: Arc<L>) -> Self {
        Self { repo, llm }
    }

    pub async fn execute(&self, child_id: &UserId) -> LearningResult<WeaknessAnalysis> {
        let attempts = self.repo.find_attempts(child_id, None).await?;

        let analysis = if attempts.is_empty() {
            empty_analysis()
        } else {
            let stats = AttemptStatistics::from_attempts(&attempts);
            let prompt = build_prompt(&attempts, &stats);

            match self.llm.complete_json(SYSTEM_PROMPT, &prompt).await {
                Ok(value) => parse_model_analysis(&value, stats.accuracy_rate),
                Err(e) => {
                    tracing::warn!(error = %e, user_id = %child_id, "LLM analysis failed, using fallback");
                    fallback_analysis(&attempts, &stats)
                }
            }
        };

        let report = WeaknessReport::new(*child_id, analysis);
        self.repo.save_report(&report).await?;

        tracing::info!(
            user_id = %child_id,
            report_id = %report.report_id,
            source = %report.analysis.source,
            overall_score = report.analysis.overall_score,
            "Weakness analysis stored"
        );

        Ok(report.analysis)
    }

    pub async fn reports(&self, child_id: &UserId) -> LearningResult<Vec<WeaknessReport>> {
        self.repo.find_reports(child_id).await
    }
}

/// Wrong answers grouped by chapter, per-type counts, and the expected reply shape
fn build_prompt(attempts: &[AttemptDetail], stats: &AttemptStatistics) -> String {
    let mut prompt = format!(
        "Below is a student's math quiz history. Analyze the wrong answers to find \
         weaknesses and recommend what to study.\n\n\
         ## Overall statistics\n\
         - Total attempts: {}\n\
         - Overall accuracy: {:.2}%\n\n\
         ## Wrong answers by chapter\n",
        stats.total_attempts, stats.accuracy_rate
    );

    for tally in tally_by_chapter(attempts)
        .into_iter()
        .filter(|t| !t.wrong.is_empty())
    {
        prompt.push_str(&format!(
            "\n### {} (chapterId {})\n- Questions attempted: {}\n- Accuracy: {:.2}%\n- Wrong answers ({}):\n",
            tally.chapter_name,
            tally.chapter_id,
            tally.total,
            tally.accuracy(),
            tally.wrong.len()
        ));
        for (i, wrong) in tally.wrong.iter().enumerate() {
            prompt.push_str(&format!(
                "  {}. Question: {}\n     Student answer: {}\n     Correct answer: {}\n",
                i + 1,
                wrong.question_title(),
                wrong.attempt.selected_choice,
                wrong.answer
            ));
        }
    }

    prompt.push_str("\n## Wrong answers by question type\n");
    for (quiz_type, count) in &stats.wrong_by_type {
        prompt.push_str(&format!("- {quiz_type}: {count} wrong\n"));
    }

    prompt.push_str(
        r#"
## Requested output

Reply with JSON of this shape:
{
  "weaknesses": [
    {
      "category": "<chapter name>",
      "chapterId": "<chapterId>",
      "problemCount": 5,
      "accuracyRate": 40.5,
      "commonMistakes": ["mistake pattern 1", "mistake pattern 2"],
      "priority": "high"
    }
  ],
  "recommendations": ["specific recommendation 1", "specific recommendation 2"],
  "overallScore": 65.5,
  "improvementAreas": ["<chapter name>"]
}

Rules:
1. priority: "high" below 50% accuracy or urgent, "medium" from 50% to 70%, "low" from 70%.
2. commonMistakes: two or three recurring mistake patterns in the wrong answers.
3. recommendations: three to five concrete, actionable study recommendations.
4. improvementAreas: categories of the "high" priority weaknesses.
"#,
    );

    prompt
}
