//! Integration specifications for the assessment scoring and career
//! recommendation workflow.
//!
//! Scenarios exercise the public service facade and HTTP router end to
//! end so intake validation, scoring, ranking, and the answer archive
//! are verified without reaching into private modules.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use skillforge::workflows::guidance::{
        AnswerArchive, ArchiveError, CareerCatalog, GuidanceService, MatchingConfig, QuizAnswer,
        StoredAssessment, TraitCategory, UserId,
    };

    #[derive(Default, Clone)]
    pub(super) struct MemoryArchive {
        assessments: Arc<Mutex<HashMap<UserId, StoredAssessment>>>,
    }

    impl MemoryArchive {
        pub(super) fn stored_for(&self, user_id: &UserId) -> Option<StoredAssessment> {
            self.assessments.lock().expect("lock").get(user_id).cloned()
        }
    }

    impl AnswerArchive for MemoryArchive {
        fn store(&self, assessment: StoredAssessment) -> Result<(), ArchiveError> {
            self.assessments
                .lock()
                .expect("lock")
                .insert(assessment.user_id.clone(), assessment);
            Ok(())
        }

        fn fetch(&self, user_id: &UserId) -> Result<Option<StoredAssessment>, ArchiveError> {
            Ok(self.assessments.lock().expect("lock").get(user_id).cloned())
        }
    }

    pub(super) fn build_service() -> (GuidanceService<MemoryArchive>, Arc<MemoryArchive>) {
        let archive = Arc::new(MemoryArchive::default());
        let service = GuidanceService::new(
            Arc::new(CareerCatalog::standard()),
            Arc::new(MatchingConfig::standard()),
            archive.clone(),
        );
        (service, archive)
    }

    /// One answer per trait category, all with the same raw score.
    pub(super) fn uniform_assessment(score: u8) -> Vec<QuizAnswer> {
        TraitCategory::ALL
            .iter()
            .enumerate()
            .map(|(index, category)| QuizAnswer {
                question_id: index as u32 + 1,
                score,
                category: *category,
            })
            .collect()
    }
}

mod scoring {
    use super::common::*;
    use skillforge::workflows::guidance::{GuidanceError, QuizIntakeError, QuizSubmission, UserId};

    #[test]
    fn uniform_answers_average_to_the_raw_score() {
        let (service, _) = build_service();
        let outcome = service
            .submit_quiz(QuizSubmission {
                user_id: None,
                answers: uniform_assessment(4),
            })
            .expect("submission scores");

        assert_eq!(outcome.personality_profile.motivation, 4.0);
        assert_eq!(outcome.personality_profile.growth, 4.0);
        assert_eq!(outcome.total_careers, 6);
    }

    #[test]
    fn empty_submission_is_rejected_before_scoring() {
        let (service, archive) = build_service();
        let result = service.submit_quiz(QuizSubmission {
            user_id: Some(UserId("learner-1".to_string())),
            answers: Vec::new(),
        });

        match result {
            Err(GuidanceError::Intake(QuizIntakeError::EmptyAnswers)) => {}
            other => panic!("expected empty-answers rejection, got {other:?}"),
        }
        assert!(archive.stored_for(&UserId("learner-1".to_string())).is_none());
    }

    #[test]
    fn out_of_range_score_is_rejected_before_archiving() {
        let (service, archive) = build_service();
        let mut answers = uniform_assessment(3);
        answers[4].score = 9;

        let result = service.submit_quiz(QuizSubmission {
            user_id: Some(UserId("learner-1".to_string())),
            answers,
        });

        assert!(matches!(
            result,
            Err(GuidanceError::Intake(QuizIntakeError::ScoreOutOfRange {
                question_id: 5,
                score: 9
            }))
        ));
        assert!(archive.stored_for(&UserId("learner-1".to_string())).is_none());
    }
}

mod ranking {
    use super::common::*;
    use skillforge::workflows::guidance::QuizSubmission;

    #[test]
    fn heaviest_weight_table_ranks_first() {
        // Twelve answers of 4 give an 80 base for every career, so the
        // ordering is decided by each career's weight-table bonus.
        let (service, _) = build_service();
        let outcome = service
            .submit_quiz(QuizSubmission {
                user_id: None,
                answers: uniform_assessment(4),
            })
            .expect("submission scores");

        let top = outcome.recommendations.first().expect("at least one match");
        assert_eq!(top.career_id.0, "product-manager");
        assert_eq!(top.match_percentage, 90);
        for window in outcome.recommendations.windows(2) {
            assert!(window[0].match_percentage >= window[1].match_percentage);
        }
    }

    #[test]
    fn reasoning_reflects_the_profile_not_the_score() {
        // With every category at 4.0, the data-scientist creativity
        // rule (threshold 3.0) fires while the analytical rule
        // (threshold 4.0, strictly above) does not.
        let (service, _) = build_service();
        let outcome = service
            .submit_quiz(QuizSubmission {
                user_id: None,
                answers: uniform_assessment(4),
            })
            .expect("submission scores");

        let data_scientist = outcome
            .recommendations
            .iter()
            .find(|m| m.career_id.0 == "data-scientist")
            .expect("data-scientist ranked");
        assert!(data_scientist
            .reasoning
            .contains("Creative problem-solving skills"));
        assert!(!data_scientist.reasoning.contains("Strong analytical thinking"));
    }

    #[test]
    fn top_scores_saturate_at_one_hundred() {
        let (service, _) = build_service();
        let outcome = service
            .submit_quiz(QuizSubmission {
                user_id: None,
                answers: uniform_assessment(5),
            })
            .expect("submission scores");

        for recommendation in &outcome.recommendations {
            assert_eq!(recommendation.match_percentage, 100);
        }
        // At a six-way tie the stable sort keeps catalog order.
        assert_eq!(outcome.recommendations[0].career_id.0, "data-scientist");
    }
}

mod archive {
    use super::common::*;
    use skillforge::workflows::guidance::{GuidanceError, QuizSubmission, UserId};

    #[test]
    fn authenticated_submissions_are_archived_and_replayable() {
        let (service, archive) = build_service();
        let learner = UserId("learner-7".to_string());

        let first = service
            .submit_quiz(QuizSubmission {
                user_id: Some(learner.clone()),
                answers: uniform_assessment(4),
            })
            .expect("submission scores");

        let stored = archive.stored_for(&learner).expect("assessment archived");
        assert_eq!(stored.answers.len(), 12);

        let replayed = service
            .recommendations_for(&learner)
            .expect("archived answers replay");
        assert_eq!(replayed.recommendations, first.recommendations);
        assert_eq!(replayed.personality_profile, first.personality_profile);
    }

    #[test]
    fn anonymous_submissions_leave_no_archive_entry() {
        let (service, archive) = build_service();
        service
            .submit_quiz(QuizSubmission {
                user_id: None,
                answers: uniform_assessment(3),
            })
            .expect("submission scores");

        assert!(archive
            .stored_for(&UserId("learner-1".to_string()))
            .is_none());
    }

    #[test]
    fn recommendations_without_an_assessment_are_refused() {
        let (service, _) = build_service();
        let result = service.recommendations_for(&UserId("stranger".to_string()));
        assert!(matches!(result, Err(GuidanceError::QuizNotCompleted)));
    }

    #[test]
    fn resubmission_replaces_the_archived_answers() {
        let (service, archive) = build_service();
        let learner = UserId("learner-7".to_string());

        service
            .submit_quiz(QuizSubmission {
                user_id: Some(learner.clone()),
                answers: uniform_assessment(2),
            })
            .expect("first submission");
        service
            .submit_quiz(QuizSubmission {
                user_id: Some(learner.clone()),
                answers: uniform_assessment(5),
            })
            .expect("second submission");

        let stored = archive.stored_for(&learner).expect("assessment archived");
        assert!(stored.answers.iter().all(|answer| answer.score == 5));
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use skillforge::workflows::guidance::guidance_router;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn build_router() -> axum::Router {
        let (service, _) = build_service();
        guidance_router(Arc::new(service))
    }

    fn quiz_payload(user_id: Option<&str>) -> Value {
        let answers: Vec<Value> = uniform_assessment(4)
            .iter()
            .map(|answer| {
                json!({
                    "question_id": answer.question_id,
                    "score": answer.score,
                    "category": answer.category,
                })
            })
            .collect();
        json!({ "user_id": user_id, "answers": answers })
    }

    async fn read_json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn post_quiz_returns_profile_and_ranked_matches() {
        let router = build_router();
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/quiz/submissions")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&quiz_payload(None)).expect("serialize"),
            ))
            .expect("request");

        let response = router.oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let payload = read_json_body(response).await;
        assert_eq!(payload["personality_profile"]["analytical"], 4.0);
        assert_eq!(payload["total_careers"], 6);
        let recommendations = payload["recommendations"]
            .as_array()
            .expect("recommendations array");
        assert_eq!(recommendations.len(), 6);
        assert_eq!(recommendations[0]["career_id"], "product-manager");
    }

    #[tokio::test]
    async fn post_quiz_rejects_empty_answers() {
        let router = build_router();
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/quiz/submissions")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&json!({ "answers": [] })).expect("serialize"),
            ))
            .expect("request");

        let response = router.oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let payload = read_json_body(response).await;
        assert!(payload["error"]
            .as_str()
            .unwrap_or_default()
            .contains("at least one"));
    }

    #[tokio::test]
    async fn recommendations_survive_a_quiz_round_trip() {
        let router = build_router();
        let submit = Request::builder()
            .method("POST")
            .uri("/api/v1/quiz/submissions")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&quiz_payload(Some("learner-9"))).expect("serialize"),
            ))
            .expect("request");
        let response = router
            .clone()
            .oneshot(submit)
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let fetch = Request::builder()
            .method("GET")
            .uri("/api/v1/users/learner-9/recommendations")
            .body(Body::empty())
            .expect("request");
        let response = router.oneshot(fetch).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let payload = read_json_body(response).await;
        assert_eq!(
            payload["recommendations"]
                .as_array()
                .map(Vec::len)
                .unwrap_or_default(),
            6
        );
    }

    #[tokio::test]
    async fn recommendations_for_an_unknown_user_are_a_client_error() {
        let router = build_router();
        let request = Request::builder()
            .method("GET")
            .uri("/api/v1/users/stranger/recommendations")
            .body(Body::empty())
            .expect("request");

        let response = router.oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let payload = read_json_body(response).await;
        assert!(payload["error"]
            .as_str()
            .unwrap_or_default()
            .contains("complete the quiz"));
    }
}
