//! Learning Router

use account::PgAccountRepository;
use account::domain::repository::UserRepository;
use account::middleware::require_active_subscription;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use platform::llm::{LanguageModel, LlmClient};
use std::sync::Arc;

use crate::application::config::LearningConfig;
use crate::domain::repository::{ChapterRepository, QuizRepository, ReportRepository};
use crate::infra::postgres::PgLearningRepository;
use crate::presentation::handlers::{self, LearningAppState};

/// Create the Learning router with PostgreSQL repositories
///
/// Every route expects [`CurrentUser`](account::CurrentUser), so the router
/// must be wrapped in `require_user`.
pub fn learning_router(
    repo: PgLearningRepository,
    users: PgAccountRepository,
    llm: LlmClient,
    config: LearningConfig,
) -> Router {
    learning_router_generic(repo, users, llm, config)
}

fn app_state<R, U, L>(repo: R, users: U, llm: L, config: LearningConfig) -> LearningAppState<R, U, L>
where
    R: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    L: Clone + Send + Sync + 'static,
{
    LearningAppState {
        repo: Arc::new(repo),
        users: Arc::new(users),
        llm: Arc::new(llm),
        config: Arc::new(config),
    }
}

/// Create a generic Learning router for any repository and model implementation
pub fn learning_router_generic<R, U, L>(repo: R, users: U, llm: L, config: LearningConfig) -> Router
where
    R: ChapterRepository + QuizRepository + ReportRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
    L: LanguageModel + Clone + Send + Sync + 'static,
{
    let state = app_state(repo, users, llm, config);

    Router::new()
        .route("/chapter", get(handlers::list_chapters::<R, U, L>))
        .route("/quiz/chapters", get(handlers::quiz_chapters::<R, U, L>))
        .route("/quiz", get(handlers::list_questions::<R, U, L>))
        .route("/quiz/unsolved", get(handlers::unsolved_questions::<R, U, L>))
        .route(
            "/quiz/submit",
            post(handlers::submit_answer::<R, U, L>)
                .route_layer(middleware::from_fn(require_active_subscription)),
        )
        .route("/quiz/attempts", get(handlers::list_attempts::<R, U, L>))
        .route(
            "/user/reward-candy-history",
            get(handlers::reward_candy_history::<R, U, L>),
        )
        .route("/user/rewards", get(handlers::rewards::<R, U, L>))
        .route("/ai/analyze-weakness", get(handlers::analyze_weakness::<R, U, L>))
        .route("/ai/reports", get(handlers::weakness_reports::<R, U, L>))
        .with_state(state)
}

/// Operator routes. Nest under `/admin` behind `require_user` and `require_admin`.
pub fn learning_admin_router<R, U, L>(repo: R, users: U, llm: L, config: LearningConfig) -> Router
where
    R: ChapterRepository + QuizRepository + ReportRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
    L: LanguageModel + Clone + Send + Sync + 'static,
{
    let state = app_state(repo, users, llm, config);

    Router::new()
        .route("/chapters", post(handlers::admin_create_chapter::<R, U, L>))
        .route("/quizzes", post(handlers::admin_create_quizzes::<R, U, L>))
        .route("/quiz-attempts", get(handlers::admin_list_attempts::<R, U, L>))
        .with_state(state)
}
