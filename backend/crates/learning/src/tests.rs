//! Unit tests for Learning crate
//!
//! Use cases and routers run against in-memory repositories and a scripted
//! language model.

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use account::AccountResult;
    use account::CurrentUser;
    use account::domain::repository::UserRepository;
    use account::models::{User, UserId as AccountUserId, UserRole};
    use axum::Router;
    use axum::body::Body;
    use axum::extract::State;
    use axum::http::{Method, Request, StatusCode, header};
    use axum::middleware::{Next, from_fn, from_fn_with_state};
    use axum::response::{IntoResponse, Response};
    use chrono::{Duration, Utc};
    use http_body_util::BodyExt;
    use platform::identity::VerifiedIdentity;
    use platform::llm::{LanguageModel, LlmError};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::application::config::LearningConfig;
    use crate::domain::entity::{
        AttemptDetail, Chapter, QuizAttempt, QuizQuestion, WeaknessReport,
    };
    use crate::domain::repository::{ChapterRepository, QuizRepository, ReportRepository};
    use crate::domain::value_object::{ChapterId, Period, QuizId, UserId};
    use crate::error::LearningResult;
    use crate::presentation::router::{learning_admin_router, learning_router_generic};

    // ------------------------------------------------------------------
    // Learning store
    // ------------------------------------------------------------------

    #[derive(Default)]
    struct MemoryState {
        chapters: Vec<Chapter>,
        questions: Vec<QuizQuestion>,
        attempts: Vec<QuizAttempt>,
        reports: Vec<WeaknessReport>,
    }

    #[derive(Clone, Default)]
    pub struct MemoryRepo {
        state: Arc<Mutex<MemoryState>>,
    }

    impl MemoryRepo {
        pub fn add_chapter(&self, grade_level: i32, order: i32, name: &str) -> Chapter {
            let chapter = Chapter::new(grade_level, order, name.to_string(), None);
            self.state.lock().unwrap().chapters.push(chapter.clone());
            chapter
        }

        pub fn add_question(&self, question: QuizQuestion) -> QuizQuestion {
            self.state.lock().unwrap().questions.push(question.clone());
            question
        }

        pub fn add_attempt(&self, attempt: QuizAttempt) {
            self.state.lock().unwrap().attempts.push(attempt);
        }

        pub fn attempts(&self) -> Vec<QuizAttempt> {
            self.state.lock().unwrap().attempts.clone()
        }

        pub fn reports(&self) -> Vec<WeaknessReport> {
            self.state.lock().unwrap().reports.clone()
        }

        fn detail(state: &MemoryState, attempt: &QuizAttempt) -> Option<AttemptDetail> {
            let question = state
                .questions
                .iter()
                .find(|q| q.quiz_id == attempt.quiz_id)?;
            let chapter = state
                .chapters
                .iter()
                .find(|c| c.chapter_id == question.chapter_id)?;
            Some(AttemptDetail {
                attempt: attempt.clone(),
                chapter_id: chapter.chapter_id,
                chapter_name: chapter.chapter_name.clone(),
                quiz_type: question.quiz_type,
                question: question.question.clone(),
                answer: question.answer.clone(),
                explanation: question.explanation.clone(),
            })
        }
    }

    impl ChapterRepository for MemoryRepo {
        async fn create_chapter(&self, chapter: &Chapter) -> LearningResult<()> {
            self.state.lock().unwrap().chapters.push(chapter.clone());
            Ok(())
        }

        async fn find_chapter(&self, chapter_id: &ChapterId) -> LearningResult<Option<Chapter>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .chapters
                .iter()
                .find(|c| c.chapter_id == *chapter_id)
                .cloned())
        }

        async fn find_chapters(&self, grade_level: Option<i32>) -> LearningResult<Vec<Chapter>> {
            let state = self.state.lock().unwrap();
            let mut chapters: Vec<Chapter> = state
                .chapters
                .iter()
                .filter(|c| grade_level.is_none_or(|g| c.grade_level == g))
                .cloned()
                .collect();
            chapters.sort_by_key(|c| (c.grade_level, c.chapter_order));
            Ok(chapters)
        }
    }

    impl QuizRepository for MemoryRepo {
        async fn create_questions(&self, questions: &[QuizQuestion]) -> LearningResult<()> {
            self.state
                .lock()
                .unwrap()
                .questions
                .extend_from_slice(questions);
            Ok(())
        }

        async fn find_question(&self, quiz_id: &QuizId) -> LearningResult<Option<QuizQuestion>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .questions
                .iter()
                .find(|q| q.quiz_id == *quiz_id)
                .cloned())
        }

        async fn find_questions(
            &self,
            chapter_id: &ChapterId,
        ) -> LearningResult<Vec<QuizQuestion>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .questions
                .iter()
                .filter(|q| q.chapter_id == *chapter_id)
                .cloned()
                .collect())
        }

        async fn find_unsolved(
            &self,
            chapter_id: &ChapterId,
            child_id: &UserId,
        ) -> LearningResult<Vec<QuizQuestion>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .questions
                .iter()
                .filter(|q| q.chapter_id == *chapter_id)
                .filter(|q| {
                    !state.attempts.iter().any(|a| {
                        a.quiz_id == q.quiz_id && a.child_id == *child_id && a.is_correct
                    })
                })
                .cloned()
                .collect())
        }

        async fn record_attempt(&self, attempt: &QuizAttempt) -> LearningResult<()> {
            self.add_attempt(attempt.clone());
            Ok(())
        }

        async fn find_attempts(
            &self,
            child_id: &UserId,
            period: Option<Period>,
        ) -> LearningResult<Vec<AttemptDetail>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .attempts
                .iter()
                .rev()
                .filter(|a| a.child_id == *child_id)
                .filter(|a| period.is_none_or(|p| p.contains(a.created_at)))
                .filter_map(|a| Self::detail(&state, a))
                .collect())
        }

        async fn find_all_attempts(&self) -> LearningResult<Vec<AttemptDetail>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .attempts
                .iter()
                .rev()
                .filter_map(|a| Self::detail(&state, a))
                .collect())
        }
    }

    impl ReportRepository for MemoryRepo {
        async fn save_report(&self, report: &WeaknessReport) -> LearningResult<()> {
            self.state.lock().unwrap().reports.push(report.clone());
            Ok(())
        }

        async fn find_reports(&self, user_id: &UserId) -> LearningResult<Vec<WeaknessReport>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .reports
                .iter()
                .rev()
                .filter(|r| r.user_id == *user_id)
                .cloned()
                .collect())
        }
    }

    // ------------------------------------------------------------------
    // Accounts
    // ------------------------------------------------------------------

    #[derive(Clone, Default)]
    pub struct MemoryUsers {
        users: Arc<Mutex<Vec<User>>>,
    }

    impl MemoryUsers {
        pub fn add(&self, uid: &str, role: UserRole, parent: Option<&User>) -> User {
            let identity = VerifiedIdentity {
                uid: uid.to_string(),
                email: Some(format!("{uid}@example.com")),
                display_name: Some(uid.to_string()),
                photo_url: None,
            };
            let mut user = User::from_identity(&identity, role);
            user.parent_id = parent.map(|p| p.user_id);
            if role == UserRole::Child {
                user.subscription_expires_at = Some(Utc::now() + Duration::days(30));
            }
            self.users.lock().unwrap().push(user.clone());
            user
        }

        pub fn update(&self, user_id: &AccountUserId, f: impl FnOnce(&mut User)) {
            let mut users = self.users.lock().unwrap();
            if let Some(user) = users.iter_mut().find(|u| u.user_id == *user_id) {
                f(user);
            }
        }

        pub fn find_uid(&self, uid: &str) -> User {
            self.by_uid(uid).expect("user exists")
        }

        fn by_uid(&self, uid: &str) -> Option<User> {
            let users = self.users.lock().unwrap();
            users.iter().find(|u| u.identity_uid == uid).cloned()
        }
    }

    impl UserRepository for MemoryUsers {
        async fn create_if_absent(&self, user: &User) -> AccountResult<User> {
            if let Some(existing) = self.by_uid(&user.identity_uid) {
                return Ok(existing);
            }
            self.users.lock().unwrap().push(user.clone());
            Ok(user.clone())
        }

        async fn create(&self, user: &User) -> AccountResult<()> {
            self.users.lock().unwrap().push(user.clone());
            Ok(())
        }

        async fn find_by_id(&self, user_id: &AccountUserId) -> AccountResult<Option<User>> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.user_id == *user_id).cloned())
        }

        async fn find_by_identity_uid(&self, uid: &str) -> AccountResult<Option<User>> {
            Ok(self.by_uid(uid))
        }

        async fn find_by_email(&self, email: &str) -> AccountResult<Option<User>> {
            let users = self.users.lock().unwrap();
            Ok(users
                .iter()
                .find(|u| u.email.as_deref() == Some(email))
                .cloned())
        }

        async fn find_all(&self) -> AccountResult<Vec<User>> {
            Ok(self.users.lock().unwrap().clone())
        }

        async fn find_children(&self, parent_id: &AccountUserId) -> AccountResult<Vec<User>> {
            let users = self.users.lock().unwrap();
            Ok(users
                .iter()
                .filter(|u| u.parent_id == Some(*parent_id))
                .cloned()
                .collect())
        }

        async fn count_children(&self, parent_id: &AccountUserId) -> AccountResult<i64> {
            Ok(self.find_children(parent_id).await?.len() as i64)
        }

        async fn update_role(&self, user_id: &AccountUserId, role: UserRole) -> AccountResult<()> {
            self.update(user_id, |u| u.set_role(role));
            Ok(())
        }

        async fn link_child(
            &self,
            child_id: &AccountUserId,
            parent_id: &AccountUserId,
        ) -> AccountResult<Option<User>> {
            self.update(child_id, |u| u.parent_id = Some(*parent_id));
            self.find_by_id(child_id).await
        }

        async fn unlink_child(
            &self,
            child_id: &AccountUserId,
            parent_id: &AccountUserId,
        ) -> AccountResult<bool> {
            let mut users = self.users.lock().unwrap();
            match users
                .iter_mut()
                .find(|u| u.user_id == *child_id && u.parent_id == Some(*parent_id))
            {
                Some(child) => {
                    child.parent_id = None;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    // ------------------------------------------------------------------
    // Language model
    // ------------------------------------------------------------------

    /// Replies with a fixed document, or fails when `reply` is `None`
    #[derive(Clone, Default)]
    pub struct ScriptedModel {
        pub reply: Option<Value>,
    }

    impl ScriptedModel {
        pub fn answering(reply: Value) -> Self {
            Self { reply: Some(reply) }
        }

        pub fn failing() -> Self {
            Self { reply: None }
        }
    }

    impl LanguageModel for ScriptedModel {
        async fn complete_json(&self, _system: &str, _user: &str) -> Result<Value, LlmError> {
            self.reply.clone().ok_or(LlmError::EmptyChoices)
        }
    }

    // ------------------------------------------------------------------
    // HTTP
    // ------------------------------------------------------------------

    /// Resolves `Bearer token-<uid>` against the in-memory accounts
    async fn fake_auth(
        State(users): State<MemoryUsers>,
        mut req: Request<Body>,
        next: Next,
    ) -> Response {
        let user = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer token-"))
            .and_then(|uid| users.by_uid(uid));

        match user {
            Some(user) => {
                req.extensions_mut().insert(CurrentUser(user));
                next.run(req).await
            }
            None => StatusCode::UNAUTHORIZED.into_response(),
        }
    }

    async fn admin_only(CurrentUser(user): CurrentUser, req: Request<Body>, next: Next) -> Response {
        if user.is_admin() {
            next.run(req).await
        } else {
            StatusCode::FORBIDDEN.into_response()
        }
    }

    /// Learning API as mounted under `/api`
    pub fn app(
        repo: &MemoryRepo,
        users: &MemoryUsers,
        llm: ScriptedModel,
        config: LearningConfig,
    ) -> Router {
        let user_api =
            learning_router_generic(repo.clone(), users.clone(), llm.clone(), config.clone())
                .layer(from_fn_with_state(users.clone(), fake_auth));
        let admin_api = learning_admin_router(repo.clone(), users.clone(), llm, config)
            .layer(from_fn(admin_only))
            .layer(from_fn_with_state(users.clone(), fake_auth));

        Router::new().merge(user_api).nest("/admin", admin_api)
    }

    pub async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        uid: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer token-{uid}"));
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use account::models::UserRole;
    use serde_json::json;

    use super::support::{MemoryRepo, MemoryUsers, ScriptedModel};
    use crate::application::config::LearningConfig;
    use crate::application::{
        AnalyzeWeaknessUseCase, NewQuestionInput, ProgressUseCase, QuizUseCase, SubmitInput,
    };
    use crate::domain::entity::{QuizAttempt, QuizQuestion};
    use crate::domain::services::RewardPolicy;
    use crate::domain::value_object::{ChapterId, QuizId, QuizType, ReportSource};
    use crate::error::LearningError;

    fn always_one() -> Arc<LearningConfig> {
        Arc::new(LearningConfig::with_reward(RewardPolicy::new(0.0, 1)))
    }

    fn short_answer(chapter_id: ChapterId, text: &str, answer: &str) -> QuizQuestion {
        QuizQuestion::new(
            2,
            QuizType::ShortAnswer,
            chapter_id,
            json!({ "text": text }),
            None,
            answer.into(),
            Some(format!("{text} is {answer}")),
        )
    }

    #[tokio::test]
    async fn test_correct_answer_draws_reward() {
        let repo = MemoryRepo::default();
        let users = MemoryUsers::default();
        let child = users.add("kid", UserRole::Child, None);
        let chapter = repo.add_chapter(2, 1, "Multiplication");
        let question = repo.add_question(short_answer(chapter.chapter_id, "2 x 3", "6"));

        let use_case = QuizUseCase::new(Arc::new(repo.clone()), always_one());
        let output = use_case
            .submit(
                &child,
                SubmitInput {
                    quiz_id: question.quiz_id,
                    answer: "  6 ".into(),
                },
            )
            .await
            .unwrap();

        assert!(output.is_correct);
        assert_eq!(output.reward_candy, 1);
        assert!(output.explanation.is_none());

        let attempts = repo.attempts();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].selected_choice, "6");
        assert_eq!(attempts[0].reward_candy, 1);
    }

    #[tokio::test]
    async fn test_wrong_answer_returns_explanation() {
        let repo = MemoryRepo::default();
        let users = MemoryUsers::default();
        let child = users.add("kid", UserRole::Child, None);
        let chapter = repo.add_chapter(2, 1, "Multiplication");
        let question = repo.add_question(short_answer(chapter.chapter_id, "2 x 3", "6"));

        let use_case = QuizUseCase::new(Arc::new(repo.clone()), always_one());
        let output = use_case
            .submit(
                &child,
                SubmitInput {
                    quiz_id: question.quiz_id,
                    answer: "5".into(),
                },
            )
            .await
            .unwrap();

        assert!(!output.is_correct);
        assert_eq!(output.reward_candy, 0);
        assert_eq!(output.explanation.as_deref(), Some("2 x 3 is 6"));
    }

    #[tokio::test]
    async fn test_submit_unknown_question() {
        let repo = MemoryRepo::default();
        let users = MemoryUsers::default();
        let child = users.add("kid", UserRole::Child, None);

        let use_case = QuizUseCase::new(Arc::new(repo), always_one());
        let result = use_case
            .submit(
                &child,
                SubmitInput {
                    quiz_id: QuizId::new(),
                    answer: "1".into(),
                },
            )
            .await;

        assert!(matches!(result, Err(LearningError::QuizNotFound)));
    }

    #[tokio::test]
    async fn test_unsolved_excludes_correct_answers() {
        let repo = MemoryRepo::default();
        let users = MemoryUsers::default();
        let child = users.add("kid", UserRole::Child, None);
        let chapter = repo.add_chapter(2, 1, "Multiplication");
        let solved = repo.add_question(short_answer(chapter.chapter_id, "2 x 3", "6"));
        let missed = repo.add_question(short_answer(chapter.chapter_id, "3 x 3", "9"));
        repo.add_attempt(QuizAttempt::new(child.user_id, solved.quiz_id, "6".into(), true, 0));
        repo.add_attempt(QuizAttempt::new(child.user_id, missed.quiz_id, "6".into(), false, 0));

        let use_case = QuizUseCase::new(Arc::new(repo), always_one());
        let unsolved = use_case.unsolved(&child, &chapter.chapter_id).await.unwrap();

        assert_eq!(unsolved.len(), 1);
        assert_eq!(unsolved[0].quiz_id, missed.quiz_id);
    }

    #[tokio::test]
    async fn test_create_questions_validates_choices() {
        let repo = MemoryRepo::default();
        let chapter = repo.add_chapter(1, 1, "Addition");
        let use_case = QuizUseCase::new(Arc::new(repo), always_one());

        let input = |choices: Option<Vec<String>>| NewQuestionInput {
            grade: 1,
            quiz_type: QuizType::MultipleChoice,
            chapter_id: chapter.chapter_id,
            question: json!({ "text": "1 + 1" }),
            choices,
            answer: "2".into(),
            explanation: None,
        };

        let missing = use_case.create_questions(vec![input(None)]).await;
        assert!(matches!(missing, Err(LearningError::Validation(m)) if m.starts_with("quizzes[0]")));

        let without_answer = use_case
            .create_questions(vec![input(Some(vec!["1".into(), "3".into()]))])
            .await;
        assert!(matches!(without_answer, Err(LearningError::Validation(_))));

        let created = use_case
            .create_questions(vec![input(Some(vec!["1".into(), "2".into()]))])
            .await
            .unwrap();
        assert_eq!(created.len(), 1);
    }

    #[tokio::test]
    async fn test_create_questions_requires_chapter() {
        let repo = MemoryRepo::default();
        let use_case = QuizUseCase::new(Arc::new(repo), always_one());

        let result = use_case
            .create_questions(vec![NewQuestionInput {
                grade: 1,
                quiz_type: QuizType::ShortAnswer,
                chapter_id: ChapterId::new(),
                question: json!({ "text": "1 + 1" }),
                choices: None,
                answer: "2".into(),
                explanation: None,
            }])
            .await;

        assert!(matches!(result, Err(LearningError::ChapterNotFound)));
    }

    #[tokio::test]
    async fn test_rewards_stats_and_month() {
        let repo = MemoryRepo::default();
        let users = MemoryUsers::default();
        let child = users.add("kid", UserRole::Child, None);
        let chapter = repo.add_chapter(2, 1, "Multiplication");
        let question = repo.add_question(short_answer(chapter.chapter_id, "2 x 3", "6"));
        repo.add_attempt(QuizAttempt::new(child.user_id, question.quiz_id, "6".into(), true, 30));
        repo.add_attempt(QuizAttempt::new(child.user_id, question.quiz_id, "6".into(), true, 0));
        repo.add_attempt(QuizAttempt::new(child.user_id, question.quiz_id, "5".into(), false, 0));

        let use_case = ProgressUseCase::new(Arc::new(repo));

        let overview = use_case.rewards(&child.user_id, None).await.unwrap();
        assert_eq!(overview.stats.total_attempts, 3);
        assert_eq!(overview.stats.correct_count, 2);
        assert_eq!(overview.stats.total_candy_earned, 30);
        assert_eq!(overview.reward_attempts().count(), 1);

        let history = use_case.reward_history(&child.user_id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].reward_candy, 30);

        let old = use_case.rewards(&child.user_id, Some("2001-01")).await.unwrap();
        assert_eq!(old.stats.total_attempts, 0);

        let invalid = use_case.rewards(&child.user_id, Some("2024-13")).await;
        assert!(matches!(invalid, Err(LearningError::InvalidMonth(_))));
    }

    #[tokio::test]
    async fn test_analysis_without_attempts_is_stored() {
        let repo = MemoryRepo::default();
        let users = MemoryUsers::default();
        let child = users.add("kid", UserRole::Child, None);

        let use_case = AnalyzeWeaknessUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(ScriptedModel::failing()),
        );
        let analysis = use_case.execute(&child.user_id).await.unwrap();

        assert!(analysis.weaknesses.is_empty());
        assert_eq!(analysis.overall_score, 0.0);
        assert_eq!(repo.reports().len(), 1);
    }

    #[tokio::test]
    async fn test_analysis_falls_back_when_model_fails() {
        let repo = MemoryRepo::default();
        let users = MemoryUsers::default();
        let child = users.add("kid", UserRole::Child, None);
        let chapter = repo.add_chapter(2, 1, "Multiplication");
        let question = repo.add_question(short_answer(chapter.chapter_id, "2 x 3", "6"));
        repo.add_attempt(QuizAttempt::new(child.user_id, question.quiz_id, "5".into(), false, 0));
        repo.add_attempt(QuizAttempt::new(child.user_id, question.quiz_id, "6".into(), true, 0));

        let use_case = AnalyzeWeaknessUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(ScriptedModel::failing()),
        );
        let analysis = use_case.execute(&child.user_id).await.unwrap();

        assert_eq!(analysis.source, ReportSource::Fallback);
        assert_eq!(analysis.overall_score, 50.0);
        assert_eq!(analysis.weaknesses.len(), 1);
        assert_eq!(analysis.weaknesses[0].category, "Multiplication");

        let reports = use_case.reports(&child.user_id).await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].analysis.source, ReportSource::Fallback);
    }

    #[tokio::test]
    async fn test_analysis_uses_model_reply() {
        let repo = MemoryRepo::default();
        let users = MemoryUsers::default();
        let child = users.add("kid", UserRole::Child, None);
        let chapter = repo.add_chapter(2, 1, "Multiplication");
        let question = repo.add_question(short_answer(chapter.chapter_id, "2 x 3", "6"));
        repo.add_attempt(QuizAttempt::new(child.user_id, question.quiz_id, "5".into(), false, 0));

        let reply = json!({
            "weaknesses": [],
            "recommendations": ["Practise the times tables daily"],
            "overallScore": 12.5,
            "improvementAreas": []
        });
        let use_case = AnalyzeWeaknessUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(ScriptedModel::answering(reply)),
        );
        let analysis = use_case.execute(&child.user_id).await.unwrap();

        assert_eq!(analysis.source, ReportSource::Llm);
        assert_eq!(analysis.overall_score, 12.5);
        assert_eq!(analysis.recommendations, vec!["Practise the times tables daily"]);
    }
}

#[cfg(test)]
mod router_tests {
    use account::models::UserRole;
    use axum::http::{Method, StatusCode};
    use chrono::{Duration, Utc};
    use serde_json::json;

    use super::support::{MemoryRepo, MemoryUsers, ScriptedModel, app, send};
    use crate::application::config::LearningConfig;
    use crate::domain::entity::{QuizAttempt, QuizQuestion};
    use crate::domain::services::RewardPolicy;
    use crate::domain::value_object::QuizType;

    fn config() -> LearningConfig {
        LearningConfig::with_reward(RewardPolicy::new(0.0, 5))
    }

    fn seeded() -> (MemoryRepo, MemoryUsers, QuizQuestion) {
        let repo = MemoryRepo::default();
        let users = MemoryUsers::default();
        let parent = users.add("parent", UserRole::Parent, None);
        users.add("kid", UserRole::Child, Some(&parent));
        users.add("stranger", UserRole::Parent, None);
        users.add("admin", UserRole::Admin, None);

        let chapter = repo.add_chapter(3, 1, "Fractions");
        repo.add_chapter(3, 2, "Decimals");
        repo.add_chapter(4, 1, "Geometry");
        let question = repo.add_question(QuizQuestion::new(
            3,
            QuizType::MultipleChoice,
            chapter.chapter_id,
            json!({ "text": "1/2 + 1/2" }),
            Some(vec!["1".into(), "2".into()]),
            "1".into(),
            Some("Halves add up to a whole".into()),
        ));
        (repo, users, question)
    }

    #[tokio::test]
    async fn test_chapter_listing() {
        let (repo, users, _) = seeded();
        let app = app(&repo, &users, ScriptedModel::failing(), config());

        let (status, body) = send(&app, Method::GET, "/chapter", "kid", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);

        let (status, body) =
            send(&app, Method::GET, "/quiz/chapters?gradeLevel=3", "kid", None).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["chapterName"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Fractions", "Decimals"]);

        let (status, _) = send(&app, Method::GET, "/quiz/chapters", "kid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_answers_hidden_from_learners() {
        let (repo, users, question) = seeded();
        let app = app(&repo, &users, ScriptedModel::failing(), config());
        let uri = format!("/quiz?chapterId={}", question.chapter_id);

        let (status, body) = send(&app, Method::GET, &uri, "kid", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body[0].get("answer").is_none());
        assert!(body[0].get("explanation").is_none());
        assert_eq!(body[0]["type"], "multiple_choice");

        let (_, body) = send(&app, Method::GET, &uri, "admin", None).await;
        assert_eq!(body[0]["answer"], "1");
    }

    #[tokio::test]
    async fn test_submit_and_attempts() {
        let (repo, users, question) = seeded();
        let app = app(&repo, &users, ScriptedModel::failing(), config());

        let (status, body) = send(
            &app,
            Method::POST,
            "/quiz/submit",
            "kid",
            Some(json!({ "quizId": question.quiz_id, "answer": "1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isCorrect"], true);
        assert!(body.get("explanation").is_none());
        let reward = body["rewardCandy"].as_i64().unwrap();
        assert!((1..=5).contains(&reward));

        let (_, body) = send(&app, Method::GET, "/quiz/attempts", "kid", None).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["questionTitle"], "1/2 + 1/2");
        assert_eq!(body[0]["chapterName"], "Fractions");
    }

    #[tokio::test]
    async fn test_submit_requires_subscription() {
        let (repo, users, question) = seeded();
        let kid = users.add("late", UserRole::Child, None);
        users.update(&kid.user_id, |u| {
            u.subscription_expires_at = Some(Utc::now() - Duration::days(1))
        });
        let app = app(&repo, &users, ScriptedModel::failing(), config());

        let (status, body) = send(
            &app,
            Method::POST,
            "/quiz/submit",
            "late",
            Some(json!({ "quizId": question.quiz_id, "answer": "1" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
        assert_eq!(body["status"], 406);
        assert!(repo.attempts().is_empty());
    }

    #[tokio::test]
    async fn test_parent_reads_child_rewards() {
        let (repo, users, question) = seeded();
        let kid = users.find_uid("kid");
        repo.add_attempt(QuizAttempt::new(kid.user_id, question.quiz_id, "1".into(), true, 4));
        let app = app(&repo, &users, ScriptedModel::failing(), config());

        let uri = format!("/user/rewards?childId={}", kid.user_id);
        let (status, body) = send(&app, Method::GET, &uri, "parent", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stats"]["totalAttempts"], 1);
        assert_eq!(body["stats"]["totalCandyEarned"], 4);
        assert_eq!(body["rewardAttempts"][0]["questionTitle"], "1/2 + 1/2");

        let uri = format!("/user/reward-candy-history?childId={}", kid.user_id);
        let (status, body) = send(&app, Method::GET, &uri, "parent", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["rewardCandy"], 4);

        let (status, _) = send(&app, Method::GET, &uri, "stranger", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_invalid_month_is_bad_request() {
        let (repo, users, _) = seeded();
        let app = app(&repo, &users, ScriptedModel::failing(), config());

        let (status, body) =
            send(&app, Method::GET, "/user/rewards?month=2024-13", "kid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn test_analysis_endpoints() {
        let (repo, users, question) = seeded();
        let kid = users.find_uid("kid");
        repo.add_attempt(QuizAttempt::new(kid.user_id, question.quiz_id, "2".into(), false, 0));
        let app = app(&repo, &users, ScriptedModel::failing(), config());

        let uri = format!("/ai/analyze-weakness?childId={}", kid.user_id);
        let (status, body) = send(&app, Method::GET, &uri, "parent", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "fallback");
        assert_eq!(body["weaknesses"][0]["priority"], "high");
        assert_eq!(body["improvementAreas"][0], "Fractions");

        let uri = format!("/ai/reports?childId={}", kid.user_id);
        let (status, body) = send(&app, Method::GET, &uri, "parent", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["overallScore"], 0.0);
    }

    #[tokio::test]
    async fn test_admin_routes() {
        let (repo, users, question) = seeded();
        let app = app(&repo, &users, ScriptedModel::failing(), config());

        let chapter = json!({ "gradeLevel": 5, "chapterOrder": 1, "chapterName": "Ratios" });
        let (status, _) =
            send(&app, Method::POST, "/admin/chapters", "kid", Some(chapter.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) =
            send(&app, Method::POST, "/admin/chapters", "admin", Some(chapter)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["chapterName"], "Ratios");

        let quizzes = json!({
            "quizzes": [{
                "grade": 3,
                "type": "short_answer",
                "chapterId": question.chapter_id,
                "question": { "text": "1/4 + 1/4" },
                "answer": "1/2"
            }]
        });
        let (status, body) =
            send(&app, Method::POST, "/admin/quizzes", "admin", Some(quizzes)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["count"], 1);

        let (status, body) = send(&app, Method::GET, "/admin/quiz-attempts", "admin", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
    }
}
