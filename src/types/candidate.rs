use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A candidate's chosen option for one aspect, either by numeric value or by
/// the option label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Assignment {
    Value(f64),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub scores: BTreeMap<String, Assignment>,
}

#[cfg(test)]
impl Candidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scores: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, aspect: impl Into<String>, value: f64) -> Self {
        self.scores.insert(aspect.into(), Assignment::Value(value));
        self
    }

    pub fn with_label(mut self, aspect: impl Into<String>, label: impl Into<String>) -> Self {
        self.scores
            .insert(aspect.into(), Assignment::Label(label.into()));
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateFile {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}
