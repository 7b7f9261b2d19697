use crate::metrics::ExperimentResult;
use crate::parameters::ParameterSet;
use crate::scoring::{calculate_scores, ScoreWeights};

pub(crate) fn find_best_index_by_score(
    results: &[ExperimentResult],
    weights: &ScoreWeights,
) -> Option<usize> {
    let scores = calculate_scores(results, weights);
    // Strictly greater replaces, so the first of equal scores wins.
    scores
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (idx, &score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((idx, score)),
        })
        .map(|(idx, _)| idx)
}

pub(crate) fn find_best_parameters_impl<'a>(
    results: &[ExperimentResult],
    parameter_sets: &'a [ParameterSet],
    weights: &ScoreWeights,
) -> Option<&'a ParameterSet> {
    if results.is_empty() || results.len() != parameter_sets.len() {
        return None;
    }

    let best_idx = find_best_index_by_score(results, weights)?;
    parameter_sets.get(best_idx)
}
