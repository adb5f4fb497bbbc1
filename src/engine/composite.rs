use crate::types::ranking::{CompositeResult, CriterionScore};
use crate::types::schema::CriteriaSchema;

/// `score = sum(benefit weighted) - sum(cost weighted)`.
pub fn composite(
    schema: &CriteriaSchema,
    candidate_ids: &[String],
    aggregated: Vec<Vec<CriterionScore>>,
) -> Vec<CompositeResult> {
    candidate_ids
        .iter()
        .zip(aggregated)
        .map(|(candidate_id, breakdown)| {
            let score = schema
                .criteria()
                .iter()
                .zip(&breakdown)
                .map(|(criterion, entry)| criterion.kind.sign() * entry.weighted)
                .fold(0.0, |acc, contribution| acc + contribution);
            CompositeResult {
                candidate_id: candidate_id.clone(),
                breakdown,
                score,
            }
        })
        .collect()
}
