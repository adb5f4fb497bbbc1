pub mod aggregate;
pub mod composite;
pub mod matrix;
pub mod normalize;
pub mod rank;
pub mod validate;

use crate::error::Result;
use crate::types::candidate::Candidate;
use crate::types::config::TieBreak;
use crate::types::ranking::{AspectDenominator, Ranking};
use crate::types::schema::CriteriaSchema;
use tracing::{debug, warn};

/// Runs the full MOORA pipeline: decision matrix, vector normalization,
/// per-criterion averaging and weighting, composite score, ranking.
///
/// Pure: no I/O, every intermediate structure is rebuilt on each call.
pub fn compute_ranking(
    schema: &CriteriaSchema,
    candidates: &[Candidate],
    tie_break: TieBreak,
) -> Result<Ranking> {
    if candidates.is_empty() {
        debug!("no candidates supplied; ranking is empty");
        return Ok(Ranking::default());
    }

    let decision = matrix::build(schema, candidates)?;
    if !decision.missing().is_empty() {
        warn!(
            cells = decision.missing().len(),
            "missing assignments scored as 0"
        );
    }
    debug!(
        rows = decision.n_rows(),
        cols = decision.n_cols(),
        "decision matrix built"
    );

    let normalized = normalize::normalize(&decision);
    let denominators = decision
        .aspects()
        .iter()
        .zip(normalized.denominators())
        .map(|(aspect, &denominator)| AspectDenominator {
            aspect: aspect.clone(),
            denominator,
        })
        .collect::<Vec<_>>();

    let aggregated = aggregate::aggregate(schema, &normalized);
    let breakdown = composite::composite(schema, decision.candidate_ids(), aggregated);
    let results = rank::rank(&breakdown, candidates, tie_break);
    debug!(candidates = results.len(), ?tie_break, "ranking computed");

    Ok(Ranking {
        results,
        breakdown,
        denominators,
    })
}
