//! function(s) for evaluating recall

use crate::data_handling::results::ResultMatrix;
use crate::error::RecallError;
use crate::util::ground_truth::GroundTruth;

/// cutoffs reported by the `evaluate` binary, in ascending order
pub const CUTOFFS: [usize; 10] = [1, 2, 5, 10, 20, 50, 100, 200, 500, 1000];

/// returns the fraction of queries whose true nearest neighbor is among the
/// first `r` results
///
/// a query counts at most once, even if its true neighbor appears more than
/// once in the first `r` results, so the value is always in [0, 1]
pub fn eval_recall(
    score: &ResultMatrix,
    groundtruth: &GroundTruth,
    r: usize,
) -> Result<f64, RecallError> {
    check_query_counts(score, groundtruth)?;

    if r == 0 || r > score.num_ranks() {
        return Err(RecallError::CutoffOutOfRange {
            cutoff: r,
            num_ranks: score.num_ranks(),
        });
    }

    // num_ranks() > 0 implies at least one query
    let n = score.num_queries();
    let mut hits = 0;
    for q in 0..n {
        let nearest = groundtruth
            .nearest(q)
            .ok_or(RecallError::MissingGroundTruth)?;

        if score.row(q).iter().take(r).any(|&id| id == nearest) {
            hits += 1;
        }
    }

    Ok(hits as f64 / n as f64)
}

/// recall at every cutoff in [`CUTOFFS`] that does not exceed the number of
/// ranked results
///
/// query counts are checked up front so a mismatch fails before any value
/// is produced
pub fn recall_report(
    score: &ResultMatrix,
    groundtruth: &GroundTruth,
) -> Result<Vec<(usize, f64)>, RecallError> {
    check_query_counts(score, groundtruth)?;

    CUTOFFS
        .iter()
        .copied()
        .filter(|&r| r <= score.num_ranks())
        .map(|r| eval_recall(score, groundtruth, r).map(|recall| (r, recall)))
        .collect()
}

/// formats one line of the report, e.g. `Recall@10:\t0.953`
pub fn format_recall(r: usize, recall: f64) -> String {
    format!("Recall@{r}:\t{recall:.3}")
}

fn check_query_counts(score: &ResultMatrix, groundtruth: &GroundTruth) -> Result<(), RecallError> {
    if score.num_queries() != groundtruth.n() {
        return Err(RecallError::QueryCountMismatch {
            score: score.num_queries(),
            groundtruth: groundtruth.n(),
        });
    }
    Ok(())
}
