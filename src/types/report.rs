use super::ranking::{Ranking, Recipient};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub body: String,
    pub blocking: bool,
    pub candidate: Option<String>,
}

impl Finding {
    pub fn warning(id: &str, title: &str, body: String, candidate: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body,
            blocking: false,
            candidate: candidate.map(str::to_string),
        }
    }

    pub fn blocking(id: &str, title: &str, body: String, candidate: Option<&str>) -> Self {
        Self {
            blocking: true,
            ..Self::warning(id, title, body, candidate)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingReport {
    pub program_id: Option<String>,
    pub ranking: Ranking,
    /// Top-K preview for the active program, if one is configured.
    pub recipients: Vec<Recipient>,
    pub findings: Vec<Finding>,
}
