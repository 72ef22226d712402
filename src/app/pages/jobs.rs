use super::job_cards;
use crate::core::client::ApiClient;
use crate::domain::model::Job;
use crate::domain::ports::PageController;
use crate::domain::view::{JobCard, Outcome};
use crate::utils::error::Result;
use crate::utils::validation::{require_text, validate_range};
use async_trait::async_trait;

pub const MAX_TOP_K: u32 = 100;

#[derive(Debug, Clone, PartialEq)]
pub enum JobsQuery {
    All,
    Search { query: String, top_k: u32 },
    Categories,
    Category(String),
}

#[derive(Debug, Clone)]
pub enum JobsResponse {
    Jobs(Vec<Job>),
    Categories(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobsView {
    Cards(Vec<JobCard>),
    Categories(Vec<String>),
}

/// Catalogue browsing: listing, semantic search and categories.
pub struct JobsPage {
    client: ApiClient,
}

impl JobsPage {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageController for JobsPage {
    type Form = JobsQuery;
    type Response = JobsResponse;
    type View = JobsView;

    fn name(&self) -> &'static str {
        "jobs"
    }

    fn validate(&self, query: &JobsQuery) -> Result<()> {
        match query {
            JobsQuery::Search { query, top_k } => {
                require_text("query", query, "Veuillez saisir une recherche.")?;
                validate_range("top_k", *top_k, 1, MAX_TOP_K)
            }
            JobsQuery::Category(name) => {
                require_text("category", name, "Veuillez choisir une catégorie.")
            }
            JobsQuery::All | JobsQuery::Categories => Ok(()),
        }
    }

    async fn call(&self, query: &JobsQuery) -> Result<JobsResponse> {
        let response = match query {
            JobsQuery::All => JobsResponse::Jobs(self.client.all_jobs().await?),
            JobsQuery::Search { query, top_k } => {
                let found = self.client.search_jobs(query.trim(), *top_k).await?;
                JobsResponse::Jobs(found.results)
            }
            JobsQuery::Categories => JobsResponse::Categories(self.client.job_categories().await?),
            JobsQuery::Category(name) => {
                JobsResponse::Jobs(self.client.jobs_by_category(name.trim()).await?)
            }
        };
        Ok(response)
    }

    fn present(&self, _query: &JobsQuery, response: JobsResponse) -> Result<Outcome<JobsView>> {
        let view = match response {
            JobsResponse::Jobs(jobs) => JobsView::Cards(job_cards(&jobs)),
            JobsResponse::Categories(names) => JobsView::Categories(names),
        };
        Ok(Outcome::live(view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn page() -> JobsPage {
        JobsPage::new(ApiClient::new("http://localhost:8000", Duration::from_secs(1)).unwrap())
    }

    #[test]
    fn test_top_k_bounds() {
        let search = |top_k| JobsQuery::Search {
            query: "data".into(),
            top_k,
        };
        assert!(page().validate(&search(0)).is_err());
        assert!(page().validate(&search(5)).is_ok());
        assert!(page().validate(&search(101)).is_err());
    }

    #[test]
    fn test_blank_category_rejected() {
        assert!(page().validate(&JobsQuery::Category(" ".into())).is_err());
        assert!(page().validate(&JobsQuery::Categories).is_ok());
    }
}
