use serde::{Deserialize, Serialize};

pub type Score = f64;

/// Per-criterion audit values for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub criterion: String,
    pub avg_norm: Score,
    pub weighted: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeResult {
    pub candidate_id: String,
    pub breakdown: Vec<CriterionScore>,
    pub score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub candidate_id: String,
    pub name: String,
    pub score: Score,
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectDenominator {
    pub aspect: String,
    pub denominator: f64,
}

/// Full output of one engine run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ranking {
    pub results: Vec<RankedResult>,
    /// Breakdown in candidate input order.
    pub breakdown: Vec<CompositeResult>,
    pub denominators: Vec<AspectDenominator>,
}

impl Ranking {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[cfg(test)]
    pub fn breakdown_for(&self, candidate_id: &str) -> Option<&CompositeResult> {
        self.breakdown
            .iter()
            .find(|result| result.candidate_id == candidate_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub candidate_id: String,
    pub rank: usize,
    pub score: Score,
    pub amount: u64,
}
