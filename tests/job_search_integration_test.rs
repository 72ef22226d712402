use career_match::app::pages::assistant::{AssistantPage, NO_RESULTS_NOTICE};
use career_match::app::pages::jobs::{JobsPage, JobsQuery, JobsView};
use career_match::app::pages::smart_assistant::{SmartAssistantPage, SmartQuery};
use career_match::{ApiClient, AppError, PageRunner};
use httpmock::prelude::*;
use std::time::Duration;

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.base_url(), Duration::from_secs(5)).unwrap()
}

fn offline_client() -> ApiClient {
    ApiClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn test_assistant_maps_backend_jobs_to_cards() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/assistant")
            .query_param("message", "data analyst casablanca");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "jobs": [
                    {
                        "job_id": 42,
                        "job_title": "Data Analyst",
                        "category": "Banque",
                        "location": "Casablanca",
                        "match_score": 0.834,
                        "stagiaires_url": "https://stagiaires.ma/offre/42"
                    },
                    { "job_title": "BI Developer" }
                ]
            }));
    });

    let runner = PageRunner::new(AssistantPage::new(client(&server)));
    let outcome = runner.run(&"data analyst casablanca".to_string()).await.unwrap();

    mock.assert();
    assert!(!outcome.demo);
    assert_eq!(outcome.view.len(), 2);
    assert_eq!(outcome.view[0].id, 42);
    assert_eq!(outcome.view[0].company, "Banque");
    assert_eq!(outcome.view[0].match_score, Some(83));
    assert_eq!(outcome.view[0].url, "https://stagiaires.ma/offre/42");
    assert_eq!(outcome.view[1].id, 2);
    assert_eq!(outcome.view[1].location, "Maroc");
}

#[tokio::test]
async fn test_assistant_tolerates_null_fields() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/assistant");
        then.status(200).json_body(serde_json::json!({
            "jobs": [{
                "job_id": 1,
                "job_title": "Data Analyst",
                "description": null,
                "required_skills": null,
                "category": null
            }],
            "suggestions": null
        }));
    });

    let runner = PageRunner::with_fallback(AssistantPage::new(client(&server)), true);
    let outcome = runner.run(&"data".to_string()).await.unwrap();

    assert!(!outcome.demo);
    assert!(outcome.notice.is_none());
    assert_eq!(outcome.view.len(), 1);
    assert_eq!(outcome.view[0].title, "Data Analyst");
    assert_eq!(outcome.view[0].company, "Non spécifié");
    assert!(outcome.view[0].description.is_empty());
}

#[tokio::test]
async fn test_assistant_empty_answer_shows_notice() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/assistant");
        then.status(200).json_body(serde_json::json!({ "jobs": [] }));
    });

    let runner = PageRunner::new(AssistantPage::new(client(&server)));
    let outcome = runner.run(&"astronaute".to_string()).await.unwrap();

    assert!(outcome.view.is_empty());
    assert!(!outcome.demo);
    assert_eq!(outcome.notice.as_deref(), Some(NO_RESULTS_NOTICE));
}

#[tokio::test]
async fn test_assistant_falls_back_to_filtered_demo_jobs() {
    let runner = PageRunner::new(AssistantPage::new(offline_client()));

    let outcome = runner.run(&"rabat".to_string()).await.unwrap();

    assert!(outcome.demo);
    assert!(!outcome.view.is_empty());
    assert!(outcome.view.iter().all(|c| c.location.to_lowercase().contains("rabat")
        || c.title.to_lowercase().contains("rabat")
        || c.company.to_lowercase().contains("rabat")));
    assert_eq!(
        outcome.notice.as_deref(),
        Some("Erreur: Impossible de se connecter au backend. Assurez-vous qu'il est en cours d'exécution.")
    );
}

#[tokio::test]
async fn test_assistant_server_error_uses_paraphrase() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/assistant");
        then.status(503).body("maintenance");
    });

    let runner = PageRunner::new(AssistantPage::new(client(&server)));
    let outcome = runner.run(&"zzz-aucune-correspondance".to_string()).await.unwrap();

    assert!(outcome.demo);
    assert_eq!(outcome.view.len(), 5);
    assert_eq!(
        outcome.notice.as_deref(),
        Some("Erreur: Erreur interne du serveur. Vérifiez les logs du backend.")
    );
}

#[tokio::test]
async fn test_assistant_without_fallback_propagates_error() {
    let runner = PageRunner::with_fallback(AssistantPage::new(offline_client()), false);

    let err = runner.run(&"rabat".to_string()).await.unwrap_err();

    assert!(err.is_network());
}

#[tokio::test]
async fn test_blank_query_never_reaches_backend() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/assistant");
        then.status(200).json_body(serde_json::json!({ "jobs": [] }));
    });

    let runner = PageRunner::new(AssistantPage::new(client(&server)));
    let err = runner.run(&"   ".to_string()).await.unwrap_err();

    assert!(matches!(err, AppError::Validation { .. }));
    assert_eq!(mock.hits(), 0);
}

#[tokio::test]
async fn test_smart_assistant_clarification_round_trip() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/smart-assistant")
            .query_param("message", "je cherche un stage")
            .query_param("clarification", "marketing");
        then.status(200).json_body(serde_json::json!({
            "assistant_response": "Voici des stages en marketing",
            "coaching_advice": "Mettez en avant vos projets",
            "intent": "job_search",
            "needs_clarification": true,
            "clarification_questions": ["Quelle ville ?"],
            "jobs": [{ "job_title": "Stagiaire Marketing" }]
        }));
    });

    let runner = PageRunner::new(SmartAssistantPage::new(client(&server)));
    let outcome = runner
        .run(&SmartQuery {
            message: "je cherche un stage".into(),
            clarification: Some("marketing".into()),
        })
        .await
        .unwrap();

    mock.assert();
    assert_eq!(outcome.view.reply, "Voici des stages en marketing");
    assert_eq!(outcome.view.clarification_questions, vec!["Quelle ville ?"]);
    assert_eq!(outcome.view.cards.len(), 1);
}

#[tokio::test]
async fn test_smart_assistant_has_no_fallback() {
    let runner = PageRunner::new(SmartAssistantPage::new(offline_client()));

    let err = runner
        .run(&SmartQuery {
            message: "bonjour".into(),
            clarification: None,
        })
        .await
        .unwrap_err();

    assert!(err.is_network());
}

#[tokio::test]
async fn test_jobs_search_sends_top_k() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/jobs/search")
            .query_param("query", "comptable")
            .query_param("top_k", "3");
        then.status(200).json_body(serde_json::json!({
            "results": [{ "job_title": "Comptable", "match_score": 0.7 }]
        }));
    });

    let runner = PageRunner::new(JobsPage::new(client(&server)));
    let outcome = runner
        .run(&JobsQuery::Search {
            query: "comptable".into(),
            top_k: 3,
        })
        .await
        .unwrap();

    mock.assert();
    match outcome.view {
        JobsView::Cards(cards) => {
            assert_eq!(cards.len(), 1);
            assert_eq!(cards[0].match_score, Some(70));
        }
        other => panic!("unexpected view {other:?}"),
    }
}

#[tokio::test]
async fn test_jobs_categories() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/jobs/categories");
        then.status(200)
            .json_body(serde_json::json!(["Finance", "Informatique", "Marketing"]));
    });

    let runner = PageRunner::new(JobsPage::new(client(&server)));
    let outcome = runner.run(&JobsQuery::Categories).await.unwrap();

    assert_eq!(
        outcome.view,
        JobsView::Categories(vec![
            "Finance".into(),
            "Informatique".into(),
            "Marketing".into()
        ])
    );
}

#[tokio::test]
async fn test_jobs_not_found_is_paraphrased() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/jobs/all");
        then.status(404).body("Not Found");
    });

    let runner = PageRunner::new(JobsPage::new(client(&server)));
    let err = runner.run(&JobsQuery::All).await.unwrap_err();

    assert_eq!(
        err.user_friendly_message(),
        "Endpoint non trouvé. Vérifiez que votre backend expose cet endpoint."
    );
}
