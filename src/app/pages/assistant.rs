use super::job_cards;
use crate::app::demo;
use crate::core::client::ApiClient;
use crate::domain::model::AssistantResponse;
use crate::domain::ports::PageController;
use crate::domain::view::{JobCard, Outcome};
use crate::utils::error::{AppError, Result};
use crate::utils::validation::require_text;
use async_trait::async_trait;

pub const NO_RESULTS_NOTICE: &str = "Aucun emploi trouvé. Essayez avec des termes différents.";

/// Natural-language job search. Falls back to filtered demo jobs when the call fails.
pub struct AssistantPage {
    client: ApiClient,
}

impl AssistantPage {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageController for AssistantPage {
    type Form = String;
    type Response = AssistantResponse;
    type View = Vec<JobCard>;

    fn name(&self) -> &'static str {
        "assistant"
    }

    fn validate(&self, query: &String) -> Result<()> {
        require_text("query", query, "Veuillez décrire le poste recherché.")
    }

    async fn call(&self, query: &String) -> Result<AssistantResponse> {
        self.client.assistant_search(query.trim()).await
    }

    fn present(&self, _query: &String, response: AssistantResponse) -> Result<Outcome<Vec<JobCard>>> {
        if response.jobs.is_empty() {
            return Ok(Outcome::live(Vec::new()).with_notice(NO_RESULTS_NOTICE));
        }
        Ok(Outcome::live(job_cards(&response.jobs)))
    }

    fn fallback(&self, query: &String, error: &AppError) -> Option<Outcome<Vec<JobCard>>> {
        Some(Outcome::demo(
            demo::filter_sample_jobs(query),
            format!("Erreur: {}", error.user_friendly_message()),
        ))
    }
}
