use crate::types::candidate::Candidate;
use crate::types::config::TieBreak;
use crate::types::ranking::{CompositeResult, RankedResult, Recipient};
use std::cmp::Ordering;

/// Sorts by descending score and assigns 1-based ranks. The sort is stable,
/// so under `TieBreak::InputOrder` equal scores keep candidate input order.
pub fn rank(
    composites: &[CompositeResult],
    candidates: &[Candidate],
    tie_break: TieBreak,
) -> Vec<RankedResult> {
    let mut order = (0..composites.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| {
        let by_score = composites[b]
            .score
            .partial_cmp(&composites[a].score)
            .unwrap_or(Ordering::Equal);
        match tie_break {
            TieBreak::InputOrder => by_score,
            TieBreak::CandidateId => by_score
                .then_with(|| composites[a].candidate_id.cmp(&composites[b].candidate_id)),
        }
    });

    order
        .into_iter()
        .enumerate()
        .map(|(position, index)| RankedResult {
            candidate_id: composites[index].candidate_id.clone(),
            name: candidates
                .get(index)
                .map(|candidate| candidate.name.clone())
                .unwrap_or_default(),
            score: composites[index].score,
            rank: position + 1,
        })
        .collect()
}

/// The first `quota` ranked candidates, each granted `amount`.
pub fn select_top_k(ranking: &[RankedResult], quota: usize, amount: u64) -> Vec<Recipient> {
    ranking
        .iter()
        .take(quota)
        .map(|result| Recipient {
            candidate_id: result.candidate_id.clone(),
            rank: result.rank,
            score: result.score,
            amount,
        })
        .collect()
}
