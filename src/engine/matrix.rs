use crate::error::{RankError, Result};
use crate::types::candidate::{Assignment, Candidate};
use crate::types::schema::CriteriaSchema;
use std::collections::HashSet;

/// Candidate x aspect table of raw assigned values, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionMatrix {
    rows: Vec<String>,
    columns: Vec<String>,
    cells: Vec<f64>,
    missing: Vec<(usize, usize)>,
}

impl DecisionMatrix {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn candidate_ids(&self) -> &[String] {
        &self.rows
    }

    pub fn aspects(&self) -> &[String] {
        &self.columns
    }

    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.columns.len() + col]
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        (0..self.rows.len()).map(move |row| self.value(row, col))
    }

    /// `(row, col)` cells that had no assignment and were filled with 0.
    pub fn missing(&self) -> &[(usize, usize)] {
        &self.missing
    }
}

/// Builds the decision matrix. Absent assignments become 0; assignments to
/// aspects outside the schema are rejected.
pub fn build(schema: &CriteriaSchema, candidates: &[Candidate]) -> Result<DecisionMatrix> {
    let columns = schema.aspects().to_vec();
    let mut cells = vec![0.0; candidates.len() * columns.len()];
    let mut missing = Vec::new();
    let mut seen = HashSet::new();

    for (row, candidate) in candidates.iter().enumerate() {
        if !seen.insert(candidate.id.as_str()) {
            return Err(RankError::DuplicateCandidate(candidate.id.clone()));
        }

        if let Some(aspect) = candidate
            .scores
            .keys()
            .find(|aspect| schema.column_of(aspect).is_none())
        {
            return Err(RankError::UnknownAspect {
                candidate: candidate.id.clone(),
                aspect: aspect.clone(),
            });
        }

        for (col, aspect) in columns.iter().enumerate() {
            let value = match candidate.scores.get(aspect) {
                Some(assignment) => resolve(schema, candidate, aspect, assignment)?,
                None => {
                    missing.push((row, col));
                    0.0
                }
            };
            cells[row * columns.len() + col] = value;
        }
    }

    Ok(DecisionMatrix {
        rows: candidates
            .iter()
            .map(|candidate| candidate.id.clone())
            .collect(),
        columns,
        cells,
        missing,
    })
}

pub(crate) fn resolve(
    schema: &CriteriaSchema,
    candidate: &Candidate,
    aspect: &str,
    assignment: &Assignment,
) -> Result<f64> {
    let value = match assignment {
        Assignment::Value(value) => *value,
        Assignment::Label(label) => {
            schema
                .value_for_label(aspect, label)
                .ok_or_else(|| RankError::InvalidScore {
                    candidate: candidate.id.clone(),
                    aspect: aspect.to_string(),
                    reason: format!("no option labelled '{label}'"),
                })?
        }
    };
    if !value.is_finite() || value < 0.0 {
        return Err(RankError::InvalidScore {
            candidate: candidate.id.clone(),
            aspect: aspect.to_string(),
            reason: format!("value must be finite and non-negative (found {value})"),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::schema::{CriterionConfig, CriterionKind, SubCriterionOption};

    fn schema() -> CriteriaSchema {
        CriteriaSchema::new(
            vec![
                CriterionConfig {
                    code: "C1".to_string(),
                    weight: 0.5,
                    kind: CriterionKind::Benefit,
                    aspects: vec!["C1_a".to_string(), "C1_b".to_string()],
                },
                CriterionConfig {
                    code: "C2".to_string(),
                    weight: 0.5,
                    kind: CriterionKind::Benefit,
                    aspects: vec!["C2_a".to_string()],
                },
            ],
            vec![SubCriterionOption {
                aspect: "C2_a".to_string(),
                value: 4.0,
                label: "high".to_string(),
            }],
        )
        .expect("schema should build")
    }

    #[test]
    fn build_places_values_by_schema_column_order() {
        let candidates = vec![
            Candidate::new("a", "A")
                .with_value("C2_a", 4.0)
                .with_value("C1_a", 1.0)
                .with_value("C1_b", 2.0),
            Candidate::new("b", "B")
                .with_value("C1_a", 3.0)
                .with_label("C2_a", "high"),
        ];

        let matrix = build(&schema(), &candidates).expect("matrix should build");
        assert_eq!(matrix.n_rows(), 2);
        assert_eq!(matrix.n_cols(), 3);
        assert_eq!(matrix.column(0).collect::<Vec<_>>(), vec![1.0, 3.0]);
        assert_eq!(matrix.column(2).collect::<Vec<_>>(), vec![4.0, 4.0]);
        assert_eq!(matrix.value(1, 1), 0.0);
        assert_eq!(matrix.missing(), &[(1, 1)]);
    }

    #[test]
    fn build_rejects_unknown_aspect() {
        let candidates = vec![Candidate::new("a", "A").with_value("C9_z", 1.0)];
        let err = build(&schema(), &candidates).expect_err("unknown aspect should fail");
        assert!(matches!(err, RankError::UnknownAspect { ref aspect, .. } if aspect == "C9_z"));
    }

    #[test]
    fn build_rejects_unknown_label() {
        let candidates = vec![Candidate::new("a", "A").with_label("C2_a", "medium")];
        let err = build(&schema(), &candidates).expect_err("unknown label should fail");
        assert!(err.to_string().contains("no option labelled 'medium'"));
    }

    #[test]
    fn build_rejects_negative_and_non_finite_values() {
        let negative = vec![Candidate::new("a", "A").with_value("C1_a", -1.0)];
        assert!(matches!(
            build(&schema(), &negative),
            Err(RankError::InvalidScore { .. })
        ));

        let nan = vec![Candidate::new("a", "A").with_value("C1_a", f64::NAN)];
        assert!(matches!(
            build(&schema(), &nan),
            Err(RankError::InvalidScore { .. })
        ));
    }

    #[test]
    fn build_rejects_duplicate_candidate_ids() {
        let candidates = vec![Candidate::new("a", "A"), Candidate::new("a", "Again")];
        assert!(matches!(
            build(&schema(), &candidates),
            Err(RankError::DuplicateCandidate(ref id)) if id == "a"
        ));
    }

    #[test]
    fn build_with_no_candidates_is_empty() {
        let matrix = build(&schema(), &[]).expect("empty matrix should build");
        assert_eq!(matrix.n_rows(), 0);
        assert_eq!(matrix.n_cols(), 3);
    }
}
