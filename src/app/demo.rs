//! Static data shown when the backend cannot be reached.

use crate::domain::model::{AnalysisSummary, CvAnalysisResult, ScoreAnalysis, SkillGap};
use crate::domain::view::JobCard;

fn card(
    id: i64,
    title: &str,
    company: &str,
    location: &str,
    date: &str,
    score: i64,
    source: &str,
    url: &str,
    description: &str,
    skills: &str,
) -> JobCard {
    JobCard {
        id,
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        date: date.to_string(),
        match_score: Some(score),
        source: source.to_string(),
        url: url.to_string(),
        description: description.to_string(),
        required_skills: skills.to_string(),
    }
}

pub fn sample_jobs() -> Vec<JobCard> {
    vec![
        card(
            1,
            "Développeur Full Stack",
            "Tech Morocco",
            "Casablanca",
            "Il y a 2 jours",
            92,
            "LinkedIn",
            "https://www.linkedin.com/jobs/view/123456",
            "Développement d'applications web full stack avec React et Node.js",
            "React, Node.js, TypeScript, MongoDB",
        ),
        card(
            2,
            "Data Analyst",
            "Finance Plus",
            "Rabat",
            "Il y a 3 jours",
            85,
            "ReKrute",
            "https://rekru.te/job/789012",
            "Analyse de données financières et création de rapports",
            "Python, SQL, Tableau, Statistiques",
        ),
        card(
            3,
            "Ingénieur DevOps",
            "Cloud Atlas",
            "Tanger",
            "Il y a 5 jours",
            78,
            "Indeed",
            "https://ma.indeed.com/job/345678",
            "Automatisation des déploiements et gestion de l'infrastructure cloud",
            "Docker, Kubernetes, AWS, CI/CD",
        ),
        card(
            4,
            "Chef de Projet Digital",
            "Média Maroc",
            "Marrakech",
            "Il y a 1 semaine",
            74,
            "Stagiaires.ma",
            "https://www.stagiaires.ma/offre/456789",
            "Pilotage de projets web et coordination des équipes techniques",
            "Gestion de projet, Agile, Scrum, Communication",
        ),
        card(
            5,
            "Développeur Mobile",
            "AppFactory",
            "Casablanca",
            "Il y a 1 semaine",
            70,
            "LinkedIn",
            "https://www.linkedin.com/jobs/view/567890",
            "Conception d'applications mobiles natives et cross-platform",
            "Flutter, Kotlin, Swift, Firebase",
        ),
    ]
}

/// Demo jobs whose title, company or location contains `query` (case-insensitive); every
/// demo job when nothing matches.
pub fn filter_sample_jobs(query: &str) -> Vec<JobCard> {
    let needle = query.trim().to_lowercase();
    let all = sample_jobs();
    let filtered: Vec<JobCard> = all
        .iter()
        .filter(|job| {
            job.title.to_lowercase().contains(&needle)
                || job.company.to_lowercase().contains(&needle)
                || job.location.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    if filtered.is_empty() {
        all
    } else {
        filtered
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn gap(skill: &str, severity: &str) -> SkillGap {
    SkillGap {
        skill_name: skill.to_string(),
        required_level: "Demandée dans l'offre".to_string(),
        current_level: "Non présente dans le CV".to_string(),
        gap_severity: severity.to_string(),
        strict_missing: true,
        explicit_in_jd: true,
        explicit_in_cv: false,
    }
}

pub fn sample_analysis() -> CvAnalysisResult {
    let common = strings(&[
        "Python",
        "SQL",
        "Data Analysis",
        "Machine Learning",
        "Git",
        "JavaScript",
        "React",
    ]);

    CvAnalysisResult {
        match_score: 0.78,
        score_analysis: ScoreAnalysis {
            final_score: 0.78,
            method: "strict_skills_analysis".to_string(),
            cv_skills_count: 8,
            job_skills_count: 10,
            common_skills_count: 7,
            coverage_percentage: 70.0,
            common_skills: common.clone(),
        },
        cv_skills: strings(&[
            "Python",
            "SQL",
            "Data Analysis",
            "Machine Learning",
            "Git",
            "JavaScript",
            "React",
            "HTML",
        ]),
        job_skills: strings(&[
            "Python",
            "SQL",
            "Data Analysis",
            "Machine Learning",
            "Git",
            "JavaScript",
            "React",
            "AWS",
            "Kubernetes",
            "Scala",
        ]),
        skill_gaps: vec![gap("AWS", "high"), gap("Kubernetes", "high"), gap("Scala", "medium")],
        missing_skills: strings(&["Kubernetes", "AWS", "Scala"]),
        strict_analysis: true,
        overall_assessment: "⚠️ Bon matching strict - La plupart des compétences présentes"
            .to_string(),
        confidence_level: "Moyenne (basée sur texte explicite)".to_string(),
        summary: AnalysisSummary {
            cv_skills_count: 8,
            job_skills_count: 10,
            common_skills: common,
            coverage: "70% des compétences demandées (strict)".to_string(),
            coverage_percentage: 70.0,
            methodology: "Extraction et comparaison STRICTE basée uniquement sur le texte explicite"
                .to_string(),
        },
        ..Default::default()
    }
}
