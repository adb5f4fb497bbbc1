use super::normalize::NormalizedMatrix;
use crate::types::ranking::CriterionScore;
use crate::types::schema::CriteriaSchema;

/// Averages each criterion's normalized aspect values and applies the
/// criterion weight. Aspects within a criterion weigh equally.
///
/// Returns one row per candidate, with criteria in declaration order.
pub fn aggregate(
    schema: &CriteriaSchema,
    normalized: &NormalizedMatrix,
) -> Vec<Vec<CriterionScore>> {
    (0..normalized.n_rows())
        .map(|row| {
            schema
                .criteria()
                .iter()
                .map(|criterion| {
                    let count = criterion.aspects.len() as f64;
                    let sum: f64 = criterion
                        .columns()
                        .map(|col| normalized.value(row, col))
                        .sum();
                    let avg_norm = sum / count;
                    CriterionScore {
                        criterion: criterion.code.clone(),
                        avg_norm,
                        weighted: avg_norm * criterion.weight,
                    }
                })
                .collect()
        })
        .collect()
}
