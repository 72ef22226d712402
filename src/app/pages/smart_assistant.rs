use super::job_cards;
use crate::core::client::ApiClient;
use crate::domain::model::SmartAssistantResponse;
use crate::domain::ports::PageController;
use crate::domain::view::{Outcome, SmartAssistantView};
use crate::utils::error::Result;
use crate::utils::validation::require_text;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct SmartQuery {
    pub message: String,
    /// Answer to a clarification question asked by the previous turn.
    pub clarification: Option<String>,
}

pub struct SmartAssistantPage {
    client: ApiClient,
}

impl SmartAssistantPage {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageController for SmartAssistantPage {
    type Form = SmartQuery;
    type Response = SmartAssistantResponse;
    type View = SmartAssistantView;

    fn name(&self) -> &'static str {
        "smart-assistant"
    }

    fn validate(&self, form: &SmartQuery) -> Result<()> {
        require_text("message", &form.message, "Veuillez saisir un message.")
    }

    async fn call(&self, form: &SmartQuery) -> Result<SmartAssistantResponse> {
        let clarification = form
            .clarification
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());
        self.client
            .smart_assistant(form.message.trim(), clarification)
            .await
    }

    fn present(
        &self,
        _form: &SmartQuery,
        response: SmartAssistantResponse,
    ) -> Result<Outcome<SmartAssistantView>> {
        let clarification_questions = if response.needs_clarification {
            response.clarification_questions
        } else {
            Vec::new()
        };

        Ok(Outcome::live(SmartAssistantView {
            reply: response.assistant_response,
            coaching_advice: response.coaching_advice.filter(|a| !a.trim().is_empty()),
            intent: response.intent,
            search_query_used: response.search_query_used,
            total_matches: response.total_matches,
            cards: job_cards(&response.jobs),
            clarification_questions,
        }))
    }
}
