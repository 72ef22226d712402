pub mod assistant;
pub mod ats_evaluator;
pub mod ats_optimizer;
pub mod cv_analyzer;
pub mod cv_builder;
pub mod jobs;
pub mod smart_assistant;

use crate::domain::model::Job;
use crate::domain::view::JobCard;

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Maps a backend job onto a result card. `index` is the position in the answer and
/// stands in for a missing `job_id`.
pub fn job_card(job: &Job, index: usize) -> JobCard {
    let urls = job.all_search_urls.as_ref();
    let url = non_blank(&job.stagiaires_url)
        .or_else(|| urls.and_then(|u| non_blank(&u.stagiaires_url)))
        .or_else(|| non_blank(&job.linkedin_url))
        .or_else(|| urls.and_then(|u| non_blank(&u.linkedin)))
        .unwrap_or("#");

    JobCard {
        id: job.job_id.unwrap_or(index as i64 + 1),
        title: non_blank(&job.job_title).unwrap_or("Sans titre").to_string(),
        company: non_blank(&job.category).unwrap_or("Non spécifié").to_string(),
        location: non_blank(&job.location).unwrap_or("Maroc").to_string(),
        date: "Récent".to_string(),
        match_score: job.match_score.map(|s| (s * 100.0).round() as i64),
        source: non_blank(&job.source).unwrap_or("Career Match AI").to_string(),
        url: url.to_string(),
        description: job.description.clone(),
        required_skills: job.required_skills.clone(),
    }
}

pub fn job_cards(jobs: &[Job]) -> Vec<JobCard> {
    jobs.iter().enumerate().map(|(i, job)| job_card(job, i)).collect()
}
