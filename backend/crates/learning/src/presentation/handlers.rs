//! HTTP Handlers

use account::CurrentUser;
use account::application::ChildrenUseCase;
use account::domain::repository::UserRepository;
use account::models::User;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use platform::llm::LanguageModel;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::LearningConfig;
use crate::application::{
    AnalyzeWeaknessUseCase, ChapterUseCase, CreateChapterInput, NewQuestionInput,
    ProgressUseCase, QuizUseCase, SubmitInput,
};
use crate::domain::repository::{ChapterRepository, QuizRepository, ReportRepository};
use crate::domain::value_object::{ChapterId, QuizId, UserId};
use crate::error::LearningResult;
use crate::presentation::dto::{
    AttemptResponse, ChapterQuery, ChapterResponse, ChildQuery, CreateChapterRequest,
    CreateQuizzesRequest, CreateQuizzesResponse, GradeQuery, QuizResponse, ReportResponse,
    RequiredGradeQuery, RewardCandyEntry, RewardsQuery, RewardsResponse, SubmitRequest,
    SubmitResponse, WeaknessAnalysisResponse,
};

/// Shared state for learning handlers
#[derive(Clone)]
pub struct LearningAppState<R, U, L>
where
    R: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    L: Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    /// Accounts, for `?childId=` access checks
    pub users: Arc<U>,
    pub llm: Arc<L>,
    pub config: Arc<LearningConfig>,
}

async fn resolve_subject<U>(users: &Arc<U>, viewer: &User, child_id: Option<Uuid>) -> LearningResult<User>
where
    U: UserRepository,
{
    let use_case = ChildrenUseCase::new(users.clone());
    Ok(use_case
        .resolve_subject(viewer, child_id.map(UserId::from_uuid))
        .await?)
}

// ============================================================================
// Chapters and questions
// ============================================================================

/// GET /api/chapter
pub async fn list_chapters<R, U, L>(
    State(state): State<LearningAppState<R, U, L>>,
    Query(query): Query<GradeQuery>,
) -> LearningResult<Json<Vec<ChapterResponse>>>
where
    R: ChapterRepository + Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    L: Clone + Send + Sync + 'static,
{
    let use_case = ChapterUseCase::new(state.repo.clone());
    let chapters = use_case.list(query.grade_level).await?;
    Ok(Json(chapters.into_iter().map(Into::into).collect()))
}

/// GET /api/quiz/chapters
pub async fn quiz_chapters<R, U, L>(
    State(state): State<LearningAppState<R, U, L>>,
    Query(query): Query<RequiredGradeQuery>,
) -> LearningResult<Json<Vec<ChapterResponse>>>
where
    R: ChapterRepository + Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    L: Clone + Send + Sync + 'static,
{
    let use_case = ChapterUseCase::new(state.repo.clone());
    let chapters = use_case.list(Some(query.grade_level)).await?;
    Ok(Json(chapters.into_iter().map(Into::into).collect()))
}

/// GET /api/quiz
pub async fn list_questions<R, U, L>(
    State(state): State<LearningAppState<R, U, L>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<ChapterQuery>,
) -> LearningResult<Json<Vec<QuizResponse>>>
where
    R: ChapterRepository + QuizRepository + Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    L: Clone + Send + Sync + 'static,
{
    let use_case = QuizUseCase::new(state.repo.clone(), state.config.clone());
    let questions = use_case
        .questions(&ChapterId::from_uuid(query.chapter_id))
        .await?;

    let reveal = user.is_admin();
    Ok(Json(
        questions
            .into_iter()
            .map(|q| QuizResponse::from_question(q, reveal))
            .collect(),
    ))
}

/// GET /api/quiz/unsolved
pub async fn unsolved_questions<R, U, L>(
    State(state): State<LearningAppState<R, U, L>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<ChapterQuery>,
) -> LearningResult<Json<Vec<QuizResponse>>>
where
    R: ChapterRepository + QuizRepository + Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    L: Clone + Send + Sync + 'static,
{
    let use_case = QuizUseCase::new(state.repo.clone(), state.config.clone());
    let questions = use_case
        .unsolved(&user, &ChapterId::from_uuid(query.chapter_id))
        .await?;

    let reveal = user.is_admin();
    Ok(Json(
        questions
            .into_iter()
            .map(|q| QuizResponse::from_question(q, reveal))
            .collect(),
    ))
}

// ============================================================================
// Attempts
// ============================================================================

/// POST /api/quiz/submit
pub async fn submit_answer<R, U, L>(
    State(state): State<LearningAppState<R, U, L>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<SubmitRequest>,
) -> LearningResult<Json<SubmitResponse>>
where
    R: ChapterRepository + QuizRepository + Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    L: Clone + Send + Sync + 'static,
{
    let use_case = QuizUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case
        .submit(
            &user,
            SubmitInput {
                quiz_id: QuizId::from_uuid(req.quiz_id),
                answer: req.answer,
            },
        )
        .await?;

    Ok(Json(SubmitResponse {
        is_correct: output.is_correct,
        reward_candy: output.reward_candy,
        explanation: output.explanation,
    }))
}

/// GET /api/quiz/attempts
pub async fn list_attempts<R, U, L>(
    State(state): State<LearningAppState<R, U, L>>,
    CurrentUser(user): CurrentUser,
) -> LearningResult<Json<Vec<AttemptResponse>>>
where
    R: ChapterRepository + QuizRepository + Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    L: Clone + Send + Sync + 'static,
{
    let use_case = QuizUseCase::new(state.repo.clone(), state.config.clone());
    let attempts = use_case.attempts(&user).await?;
    Ok(Json(attempts.iter().map(Into::into).collect()))
}

/// GET /api/user/reward-candy-history
pub async fn reward_candy_history<R, U, L>(
    State(state): State<LearningAppState<R, U, L>>,
    CurrentUser(viewer): CurrentUser,
    Query(query): Query<ChildQuery>,
) -> LearningResult<Json<Vec<RewardCandyEntry>>>
where
    R: QuizRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
    L: Clone + Send + Sync + 'static,
{
    let subject = resolve_subject(&state.users, &viewer, query.child_id).await?;

    let use_case = ProgressUseCase::new(state.repo.clone());
    let history = use_case.reward_history(&subject.user_id).await?;
    Ok(Json(history.into_iter().map(Into::into).collect()))
}

/// GET /api/user/rewards
pub async fn rewards<R, U, L>(
    State(state): State<LearningAppState<R, U, L>>,
    CurrentUser(viewer): CurrentUser,
    Query(query): Query<RewardsQuery>,
) -> LearningResult<Json<RewardsResponse>>
where
    R: QuizRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
    L: Clone + Send + Sync + 'static,
{
    let subject = resolve_subject(&state.users, &viewer, query.child_id).await?;

    let use_case = ProgressUseCase::new(state.repo.clone());
    let overview = use_case
        .rewards(&subject.user_id, query.month.as_deref())
        .await?;
    Ok(Json(overview.into()))
}

// ============================================================================
// Weakness analysis
// ============================================================================

/// GET /api/ai/analyze-weakness
pub async fn analyze_weakness<R, U, L>(
    State(state): State<LearningAppState<R, U, L>>,
    CurrentUser(viewer): CurrentUser,
    Query(query): Query<ChildQuery>,
) -> LearningResult<Json<WeaknessAnalysisResponse>>
where
    R: QuizRepository + ReportRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
    L: LanguageModel + Clone + Send + Sync + 'static,
{
    let subject = resolve_subject(&state.users, &viewer, query.child_id).await?;

    let use_case = AnalyzeWeaknessUseCase::new(state.repo.clone(), state.llm.clone());
    let analysis = use_case.execute(&subject.user_id).await?;
    Ok(Json(analysis.into()))
}

/// GET /api/ai/reports
pub async fn weakness_reports<R, U, L>(
    State(state): State<LearningAppState<R, U, L>>,
    CurrentUser(viewer): CurrentUser,
    Query(query): Query<ChildQuery>,
) -> LearningResult<Json<Vec<ReportResponse>>>
where
    R: QuizRepository + ReportRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
    L: LanguageModel + Clone + Send + Sync + 'static,
{
    let subject = resolve_subject(&state.users, &viewer, query.child_id).await?;

    let use_case = AnalyzeWeaknessUseCase::new(state.repo.clone(), state.llm.clone());
    let reports = use_case.reports(&subject.user_id).await?;
    Ok(Json(reports.into_iter().map(Into::into).collect()))
}

// ============================================================================
// Admin
// ============================================================================

/// POST /api/admin/chapters
pub async fn admin_create_chapter<R, U, L>(
    State(state): State<LearningAppState<R, U, L>>,
    Json(req): Json<CreateChapterRequest>,
) -> LearningResult<(StatusCode, Json<ChapterResponse>)>
where
    R: ChapterRepository + Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    L: Clone + Send + Sync + 'static,
{
    let use_case = ChapterUseCase::new(state.repo.clone());
    let chapter = use_case
        .create(CreateChapterInput {
            grade_level: req.grade_level,
            chapter_order: req.chapter_order,
            chapter_name: req.chapter_name,
            chapter_description: req.chapter_description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(chapter.into())))
}

/// POST /api/admin/quizzes
pub async fn admin_create_quizzes<R, U, L>(
    State(state): State<LearningAppState<R, U, L>>,
    Json(req): Json<CreateQuizzesRequest>,
) -> LearningResult<(StatusCode, Json<CreateQuizzesResponse>)>
where
    R: ChapterRepository + QuizRepository + Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    L: Clone + Send + Sync + 'static,
{
    let inputs = req
        .quizzes
        .into_iter()
        .map(|q| NewQuestionInput {
            grade: q.grade,
            quiz_type: q.quiz_type,
            chapter_id: ChapterId::from_uuid(q.chapter_id),
            question: q.question,
            choices: q.choices,
            answer: q.answer,
            explanation: q.explanation,
        })
        .collect();

    let use_case = QuizUseCase::new(state.repo.clone(), state.config.clone());
    let questions = use_case.create_questions(inputs).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateQuizzesResponse {
            count: questions.len(),
            quizzes: questions
                .into_iter()
                .map(|q| QuizResponse::from_question(q, true))
                .collect(),
        }),
    ))
}

/// GET /api/admin/quiz-attempts
pub async fn admin_list_attempts<R, U, L>(
    State(state): State<LearningAppState<R, U, L>>,
) -> LearningResult<Json<Vec<AttemptResponse>>>
where
    R: ChapterRepository + QuizRepository + Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    L: Clone + Send + Sync + 'static,
{
    let use_case = QuizUseCase::new(state.repo.clone(), state.config.clone());
    let attempts = use_case.all_attempts().await?;
    Ok(Json(attempts.iter().map(Into::into).collect()))
}
