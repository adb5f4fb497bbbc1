use super::schema::{CriteriaSchema, CriterionConfig, SubCriterionOption};
use crate::error::RankError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct AidrankConfig {
    pub program: Option<ProgramConfig>,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub criteria: Vec<CriterionConfig>,
    #[serde(default)]
    pub options: Vec<SubCriterionOption>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProgramConfig {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub quota: usize,
    #[serde(default)]
    pub amount: u64,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// Absent assignments count as 0 and are reported as warnings.
    #[default]
    Zero,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Equal scores keep candidate input order.
    #[default]
    InputOrder,
    CandidateId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub missing: MissingPolicy,
    #[serde(default)]
    pub tie_break: TieBreak,
    #[serde(default = "default_candidates")]
    pub candidates: String,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            missing: MissingPolicy::default(),
            tie_break: TieBreak::default(),
            candidates: default_candidates(),
        }
    }
}

fn default_candidates() -> String {
    "candidates.toml".to_string()
}

impl AidrankConfig {
    pub fn schema(&self) -> Result<CriteriaSchema, RankError> {
        CriteriaSchema::new(self.criteria.clone(), self.options.clone())
    }

    /// The configured program, when it is active.
    pub fn active_program(&self) -> Option<&ProgramConfig> {
        self.program.as_ref().filter(|program| program.active)
    }

    pub fn validate(&self) -> Result<(), RankError> {
        if let Some(program) = &self.program {
            let id = program.id.trim();
            if id.is_empty() {
                return Err(RankError::ConfigParse(
                    "program.id must be non-empty".to_string(),
                ));
            }
            if !id
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'))
                || id.starts_with('.')
            {
                return Err(RankError::ConfigParse(format!(
                    "program.id may only contain ASCII letters, digits, '-', '_' and '.': {id}"
                )));
            }
            if program.quota == 0 {
                return Err(RankError::ConfigParse(
                    "program.quota must be greater than 0".to_string(),
                ));
            }
        }

        if self.scoring.candidates.trim().is_empty() {
            return Err(RankError::ConfigParse(
                "scoring.candidates must be a non-empty path".to_string(),
            ));
        }

        self.schema().map(|_| ())
    }
}
