//! Unit tests for Mentoring crate

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use account::CurrentUser;
    use account::models::{User, UserRole};
    use axum::Router;
    use axum::body::Body;
    use axum::extract::State;
    use axum::http::{Method, Request, StatusCode, header};
    use axum::middleware::{Next, from_fn_with_state};
    use axum::response::{IntoResponse, Response};
    use chrono::{DateTime, Utc};
    use http_body_util::BodyExt;
    use platform::identity::VerifiedIdentity;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::domain::entity::{Mentor, MentoringRequest};
    use crate::domain::repository::{DecisionOutcome, MentorRepository, RequestRepository};
    use crate::domain::services::apply_decision;
    use crate::domain::value_object::{
        Decision, MentorId, MentoringRequestId, RequestStatus, UserId,
    };
    use crate::error::MentoringResult;
    use crate::presentation::router::{mentoring_admin_router, mentoring_router_generic};

    #[derive(Default)]
    struct MemoryState {
        users: Vec<User>,
        requests: Vec<MentoringRequest>,
        mentors: Vec<Mentor>,
    }

    #[derive(Clone, Default)]
    pub struct MemoryRepo {
        state: Arc<Mutex<MemoryState>>,
    }

    impl MemoryRepo {
        pub fn add_user(&self, uid: &str, role: UserRole, parent: Option<&User>) -> User {
            let identity = VerifiedIdentity {
                uid: uid.to_string(),
                email: Some(format!("{uid}@example.com")),
                display_name: None,
                photo_url: None,
            };
            let mut user = User::from_identity(&identity, role);
            user.parent_id = parent.map(|p| p.user_id);
            self.state.lock().unwrap().users.push(user.clone());
            user
        }

        pub fn insert_mentor(&self, mentor: Mentor) -> Mentor {
            self.state.lock().unwrap().mentors.push(mentor.clone());
            mentor
        }

        pub fn mentor(&self, mentor_id: &MentorId) -> Option<Mentor> {
            let state = self.state.lock().unwrap();
            state
                .mentors
                .iter()
                .find(|m| m.mentor_id == *mentor_id)
                .cloned()
        }

        pub fn request(&self, request_id: &MentoringRequestId) -> Option<MentoringRequest> {
            let state = self.state.lock().unwrap();
            state
                .requests
                .iter()
                .find(|r| r.request_id == *request_id)
                .cloned()
        }

        fn user_by_uid(&self, uid: &str) -> Option<User> {
            let state = self.state.lock().unwrap();
            state.users.iter().find(|u| u.identity_uid == uid).cloned()
        }
    }

    impl RequestRepository for MemoryRepo {
        async fn create_request(&self, request: &MentoringRequest) -> MentoringResult<()> {
            self.state.lock().unwrap().requests.push(request.clone());
            Ok(())
        }

        async fn find_request(
            &self,
            request_id: &MentoringRequestId,
        ) -> MentoringResult<Option<MentoringRequest>> {
            Ok(self.request(request_id))
        }

        async fn find_requests_by_parent(
            &self,
            parent_id: &UserId,
        ) -> MentoringResult<Vec<MentoringRequest>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .requests
                .iter()
                .rev()
                .filter(|r| r.parent_id == *parent_id)
                .cloned()
                .collect())
        }

        async fn find_pending_requests(&self) -> MentoringResult<Vec<MentoringRequest>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .requests
                .iter()
                .filter(|r| r.is_pending())
                .cloned()
                .collect())
        }

        async fn cancel_request(
            &self,
            request_id: &MentoringRequestId,
            parent_id: &UserId,
        ) -> MentoringResult<bool> {
            let mut state = self.state.lock().unwrap();
            let request = state.requests.iter_mut().find(|r| {
                r.request_id == *request_id && r.parent_id == *parent_id && r.is_pending()
            });
            Ok(match request {
                Some(request) => {
                    request.status = RequestStatus::Cancelled;
                    request.updated_at = Utc::now();
                    true
                }
                None => false,
            })
        }

        async fn is_child_of(&self, child_id: &UserId, parent_id: &UserId) -> MentoringResult<bool> {
            let state = self.state.lock().unwrap();
            Ok(state
                .users
                .iter()
                .any(|u| u.user_id == *child_id && u.parent_id == Some(*parent_id)))
        }

        async fn decide(
            &self,
            request_id: &MentoringRequestId,
            decision: Decision,
            mentor_id: Option<&MentorId>,
            mentor_name: Option<&str>,
            now: DateTime<Utc>,
        ) -> MentoringResult<DecisionOutcome> {
            let mut state = self.state.lock().unwrap();
            let Some(mut request) = state
                .requests
                .iter()
                .find(|r| r.request_id == *request_id)
                .cloned()
            else {
                return Ok(DecisionOutcome::RequestNotFound);
            };

            let mut mentor = match (decision, mentor_id) {
                (Decision::Matched, Some(id)) => {
                    match state.mentors.iter().find(|m| m.mentor_id == *id).cloned() {
                        Some(mentor) => Some(mentor),
                        None => return Ok(DecisionOutcome::MentorNotFound),
                    }
                }
                _ => None,
            };

            if let Err(e) = apply_decision(&mut request, decision, mentor.as_mut(), mentor_name, now)
            {
                return Ok(DecisionOutcome::Rejected(e));
            }

            if let Some(mentor) = mentor {
                if let Some(slot) = state
                    .mentors
                    .iter_mut()
                    .find(|m| m.mentor_id == mentor.mentor_id)
                {
                    *slot = mentor;
                }
            }
            if let Some(slot) = state
                .requests
                .iter_mut()
                .find(|r| r.request_id == request.request_id)
            {
                *slot = request.clone();
            }

            Ok(DecisionOutcome::Decided(request))
        }
    }

    impl MentorRepository for MemoryRepo {
        async fn create_mentor(&self, mentor: &Mentor) -> MentoringResult<()> {
            self.state.lock().unwrap().mentors.push(mentor.clone());
            Ok(())
        }

        async fn find_mentors(&self) -> MentoringResult<Vec<Mentor>> {
            let state = self.state.lock().unwrap();
            Ok(state.mentors.iter().rev().cloned().collect())
        }
    }

    pub fn mentor(name: &str) -> Mentor {
        Mentor::new(name.into(), "010-1234-5678".into(), None, None)
    }

    async fn fake_auth(
        State(repo): State<MemoryRepo>,
        mut req: Request<Body>,
        next: Next,
    ) -> Response {
        let user = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer token-"))
            .and_then(|uid| repo.user_by_uid(uid));

        match user {
            Some(user) => {
                req.extensions_mut().insert(CurrentUser(user));
                next.run(req).await
            }
            None => StatusCode::UNAUTHORIZED.into_response(),
        }
    }

    /// Mentoring API as mounted under `/api`; operator routes skip the role check
    pub fn app(repo: &MemoryRepo) -> Router {
        let user_api = mentoring_router_generic(repo.clone())
            .layer(from_fn_with_state(repo.clone(), fake_auth));
        let admin_api = mentoring_admin_router(repo.clone());

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

    use account::AccountError;
    use account::models::{User, UserRole};

    use super::support::{MemoryRepo, mentor};
    use crate::application::{ApplyInput, CreateMentorInput, DecideInput, MentorUseCase, RequestUseCase};
    use crate::domain::services::ADMIN_MATCHED;
    use crate::domain::value_object::{Decision, MentorId, MentorStatus, RequestStatus, UserId};
    use crate::error::MentoringError;

    fn requests(repo: &MemoryRepo) -> RequestUseCase<MemoryRepo> {
        RequestUseCase::new(Arc::new(repo.clone()))
    }

    fn application(child_id: Option<UserId>) -> ApplyInput {
        ApplyInput {
            child_id,
            title: " Math tutoring ".into(),
            child_name: "Minjun".into(),
            child_age: "3rd grade".into(),
            requirement: "Fractions and decimals".into(),
        }
    }

    async fn pending_request(repo: &MemoryRepo, parent: &User) -> crate::domain::entity::MentoringRequest {
        requests(repo).apply(parent, application(None)).await.unwrap()
    }

    #[tokio::test]
    async fn test_apply_for_own_child() {
        let repo = MemoryRepo::default();
        let parent = repo.add_user("parent", UserRole::Parent, None);
        let child = repo.add_user("kid", UserRole::Child, Some(&parent));

        let request = requests(&repo)
            .apply(&parent, application(Some(child.user_id)))
            .await
            .unwrap();

        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.title, "Math tutoring");
        assert_eq!(request.child_id, Some(child.user_id));
    }

    #[tokio::test]
    async fn test_apply_rejects_foreign_child() {
        let repo = MemoryRepo::default();
        let parent = repo.add_user("parent", UserRole::Parent, None);
        let other = repo.add_user("other", UserRole::Parent, None);
        let child = repo.add_user("kid", UserRole::Child, Some(&other));

        let result = requests(&repo)
            .apply(&parent, application(Some(child.user_id)))
            .await;
        assert!(matches!(
            result,
            Err(MentoringError::Account(AccountError::NotYourChild))
        ));
    }

    #[tokio::test]
    async fn test_apply_requires_title_and_requirement() {
        let repo = MemoryRepo::default();
        let parent = repo.add_user("parent", UserRole::Parent, None);

        let blank_title = ApplyInput {
            title: "  ".into(),
            ..application(None)
        };
        let result = requests(&repo).apply(&parent, blank_title).await;
        assert!(matches!(result, Err(MentoringError::Validation(_))));

        let blank_requirement = ApplyInput {
            requirement: String::new(),
            ..application(None)
        };
        let result = requests(&repo).apply(&parent, blank_requirement).await;
        assert!(matches!(result, Err(MentoringError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_hides_other_parents_requests() {
        let repo = MemoryRepo::default();
        let parent = repo.add_user("parent", UserRole::Parent, None);
        let other = repo.add_user("other", UserRole::Parent, None);
        let request = pending_request(&repo, &parent).await;

        assert!(requests(&repo).get(&parent, &request.request_id).await.is_ok());
        let result = requests(&repo).get(&other, &request.request_id).await;
        assert!(matches!(result, Err(MentoringError::RequestNotFound)));
    }

    #[tokio::test]
    async fn test_cancel_only_pending() {
        let repo = MemoryRepo::default();
        let parent = repo.add_user("parent", UserRole::Parent, None);
        let request = pending_request(&repo, &parent).await;
        let use_case = requests(&repo);

        use_case.cancel(&parent, &request.request_id).await.unwrap();
        assert_eq!(
            repo.request(&request.request_id).unwrap().status,
            RequestStatus::Cancelled
        );

        let again = use_case.cancel(&parent, &request.request_id).await;
        assert!(matches!(again, Err(MentoringError::CancelNotAllowed)));
    }

    #[tokio::test]
    async fn test_match_with_mentor_links_both() {
        let repo = MemoryRepo::default();
        let parent = repo.add_user("parent", UserRole::Parent, None);
        let request = pending_request(&repo, &parent).await;
        let mentor = repo.insert_mentor(mentor("Seo"));

        let decided = requests(&repo)
            .decide(
                &request.request_id,
                DecideInput {
                    decision: Decision::Matched,
                    mentor_id: Some(mentor.mentor_id),
                    mentor_name: Some("ignored".into()),
                },
            )
            .await
            .unwrap();

        assert_eq!(decided.status, RequestStatus::Matched);
        assert_eq!(decided.mentor_id, Some(mentor.mentor_id));
        assert_eq!(decided.mentor_name.as_deref(), Some("Seo"));

        let stored = repo.mentor(&mentor.mentor_id).unwrap();
        assert_eq!(stored.status, MentorStatus::Matched);
        assert_eq!(stored.mentoring_request_id, Some(request.request_id));
    }

    #[tokio::test]
    async fn test_match_with_busy_mentor_changes_nothing() {
        let repo = MemoryRepo::default();
        let parent = repo.add_user("parent", UserRole::Parent, None);
        let first = pending_request(&repo, &parent).await;
        let second = pending_request(&repo, &parent).await;
        let mentor = repo.insert_mentor(mentor("Seo"));
        let use_case = requests(&repo);
        let matched = |mentor_id| DecideInput {
            decision: Decision::Matched,
            mentor_id: Some(mentor_id),
            mentor_name: None,
        };

        use_case
            .decide(&first.request_id, matched(mentor.mentor_id))
            .await
            .unwrap();
        let result = use_case
            .decide(&second.request_id, matched(mentor.mentor_id))
            .await;

        assert!(matches!(result, Err(MentoringError::MentorUnavailable)));
        assert!(repo.request(&second.request_id).unwrap().is_pending());
        assert_eq!(
            repo.mentor(&mentor.mentor_id).unwrap().mentoring_request_id,
            Some(first.request_id)
        );
    }

    #[tokio::test]
    async fn test_match_without_mentor_and_unknown_mentor() {
        let repo = MemoryRepo::default();
        let parent = repo.add_user("parent", UserRole::Parent, None);
        let request = pending_request(&repo, &parent).await;
        let use_case = requests(&repo);

        let result = use_case
            .decide(
                &request.request_id,
                DecideInput {
                    decision: Decision::Matched,
                    mentor_id: Some(MentorId::new()),
                    mentor_name: None,
                },
            )
            .await;
        assert!(matches!(result, Err(MentoringError::MentorNotFound)));

        let decided = use_case
            .decide(
                &request.request_id,
                DecideInput {
                    decision: Decision::Matched,
                    mentor_id: None,
                    mentor_name: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(decided.mentor_name.as_deref(), Some(ADMIN_MATCHED));

        let again = use_case
            .decide(
                &request.request_id,
                DecideInput {
                    decision: Decision::Rejected,
                    mentor_id: None,
                    mentor_name: None,
                },
            )
            .await;
        assert!(matches!(again, Err(MentoringError::NotPending)));
    }

    #[tokio::test]
    async fn test_create_mentor_requires_name_and_mobile() {
        let repo = MemoryRepo::default();
        let use_case = MentorUseCase::new(Arc::new(repo.clone()));

        let result = use_case
            .create(CreateMentorInput {
                name: "Seo".into(),
                mobile_number: " ".into(),
                email: None,
                bio: None,
            })
            .await;
        assert!(matches!(result, Err(MentoringError::Validation(_))));

        let mentor = use_case
            .create(CreateMentorInput {
                name: "Seo".into(),
                mobile_number: "010-0000-0000".into(),
                email: Some("  ".into()),
                bio: Some("Math teacher".into()),
            })
            .await
            .unwrap();
        assert_eq!(mentor.status, MentorStatus::Available);
        assert_eq!(mentor.email, None);
        assert_eq!(use_case.list().await.unwrap().len(), 1);
    }
}

#[cfg(test)]
mod router_tests {
    use account::models::UserRole;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use super::support::{MemoryRepo, app, mentor, send};

    fn application() -> serde_json::Value {
        json!({
            "title": "Reading club",
            "childName": "Minjun",
            "childAge": "2nd grade",
            "requirement": "Weekly sessions"
        })
    }

    #[tokio::test]
    async fn test_apply_list_and_cancel() {
        let repo = MemoryRepo::default();
        repo.add_user("parent", UserRole::Parent, None);
        repo.add_user("other", UserRole::Parent, None);
        let app = app(&repo);

        let (status, created) = send(
            &app,
            Method::POST,
            "/mentoring/applications",
            "parent",
            Some(application()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "pending");
        assert_eq!(created["childAge"], "2nd grade");

        let (status, list) = send(&app, Method::GET, "/mentoring/applications", "parent", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);

        let uri = format!("/mentoring/applications/{}", created["id"].as_str().unwrap());
        let (status, _) = send(&app, Method::GET, &uri, "other", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::DELETE, &uri, "parent", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, problem) = send(&app, Method::DELETE, &uri, "parent", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(problem["detail"], "Only pending requests can be cancelled");
    }

    #[tokio::test]
    async fn test_apply_for_foreign_child_is_forbidden() {
        let repo = MemoryRepo::default();
        repo.add_user("parent", UserRole::Parent, None);
        let other = repo.add_user("other", UserRole::Parent, None);
        let child = repo.add_user("kid", UserRole::Child, Some(&other));
        let app = app(&repo);

        let mut body = application();
        body["childId"] = json!(child.user_id.into_uuid());
        let (status, _) = send(&app, Method::POST, "/mentoring/applications", "parent", Some(body)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_match_flow() {
        let repo = MemoryRepo::default();
        repo.add_user("parent", UserRole::Parent, None);
        let seo = repo.insert_mentor(mentor("Seo"));
        let app = app(&repo);

        let (_, first) = send(&app, Method::POST, "/mentoring/applications", "parent", Some(application())).await;
        let (_, second) = send(&app, Method::POST, "/mentoring/applications", "parent", Some(application())).await;

        let (status, pending) = send(&app, Method::GET, "/admin/mentoring/pending", "admin", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(pending[0]["id"], first["id"]);

        let body = json!({ "status": "matched", "mentorId": seo.mentor_id.into_uuid() });
        let uri = format!("/admin/mentoring/{}/status", first["id"].as_str().unwrap());
        let (status, matched) = send(&app, Method::PATCH, &uri, "admin", Some(body.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(matched["status"], "matched");
        assert_eq!(matched["mentorName"], "Seo");

        let (status, _) = send(&app, Method::PATCH, &uri, "admin", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let uri = format!("/admin/mentoring/{}/status", second["id"].as_str().unwrap());
        let (status, _) = send(&app, Method::PATCH, &uri, "admin", Some(body)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, mentors) = send(&app, Method::GET, "/admin/mentors", "admin", None).await;
        assert_eq!(mentors[0]["status"], "matched");
    }

    #[tokio::test]
    async fn test_admin_create_mentor() {
        let repo = MemoryRepo::default();
        let app = app(&repo);

        let body = json!({ "name": "Seo", "mobileNumber": "010-0000-0000", "bio": "Math" });
        let (status, created) = send(&app, Method::POST, "/admin/mentors", "admin", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "available");

        let body = json!({ "name": "", "mobileNumber": "010" });
        let (status, _) = send(&app, Method::POST, "/admin/mentors", "admin", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
