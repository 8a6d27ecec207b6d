//! Euclidean distance ranking over document centroids.

use tracing::debug;

use crate::document::{Document, NeighborResult};
use crate::error::{RecommendError, Result};

/// Compute the Euclidean distance between two vectors.
///
/// # Errors
///
/// Returns [`RecommendError::DimensionMismatch`] if the vectors differ in
/// length or are empty.
pub fn distance(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() || a.is_empty() {
        return Err(RecommendError::DimensionMismatch { left: a.len(), right: b.len() });
    }
    let squared: f64 = a.iter().zip(b).map(|(x, y)| (y - x) * (y - x)).sum();
    Ok(squared.sqrt())
}

/// Ranks candidate documents by centroid distance to a target.
///
/// The ranker holds no state; it exists to group the ranking operations and
/// can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ranker;

impl Ranker {
    /// Rank every candidate that has a centroid by distance to `target`.
    ///
    /// Results are sorted ascending by distance; equal distances keep the
    /// order of `candidates`. If `target` is among the candidates it ranks
    /// first (distance zero) unless an identical centroid precedes it.
    /// Candidates without a centroid are left out.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::InvalidInput`] if `candidates` is empty,
    /// `target` has no centroid, or no candidate has one, and
    /// [`RecommendError::DimensionMismatch`] if centroid lengths disagree.
    pub fn rank<'a>(
        &self,
        target: &Document,
        candidates: &'a [Document],
    ) -> Result<Vec<NeighborResult<'a>>> {
        if candidates.is_empty() {
            return Err(RecommendError::InvalidInput("no candidate documents".to_string()));
        }
        let origin = target.centroid.as_deref().ok_or_else(|| {
            RecommendError::InvalidInput(format!("document '{}' has no centroid", target.id))
        })?;

        let mut results = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let Some(centroid) = candidate.centroid.as_deref() else {
                continue;
            };
            results.push(NeighborResult { distance: distance(origin, centroid)?, document: candidate });
        }

        let skipped = candidates.len() - results.len();
        if skipped > 0 {
            debug!(skipped, "excluded candidates without a centroid");
        }
        if results.is_empty() {
            return Err(RecommendError::InvalidInput(
                "no candidate document has a centroid".to_string(),
            ));
        }

        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        Ok(results)
    }

    /// Return the `n` nearest neighbors of `target`, excluding `target` itself.
    ///
    /// # Errors
    ///
    /// Any error from [`rank`](Ranker::rank), or
    /// [`RecommendError::InsufficientCandidates`] if fewer than `n` other
    /// documents can be ranked.
    pub fn recommend<'a>(
        &self,
        target: &Document,
        candidates: &'a [Document],
        n: usize,
    ) -> Result<Vec<NeighborResult<'a>>> {
        let neighbors: Vec<_> = self
            .rank(target, candidates)?
            .into_iter()
            .filter(|result| result.document.id != target.id)
            .collect();

        if neighbors.len() < n {
            return Err(RecommendError::InsufficientCandidates {
                requested: n,
                available: neighbors.len(),
            });
        }
        Ok(neighbors.into_iter().take(n).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn doc(id: &str, centroid: Option<Vec<f64>>) -> Document {
        Document {
            id: id.to_string(),
            title: id.to_uppercase(),
            text: String::new(),
            centroid,
            source_path: PathBuf::from(id),
        }
    }

    fn ids<'a>(results: &[NeighborResult<'a>]) -> Vec<&'a str> {
        results.iter().map(|r| r.document.id.as_str()).collect()
    }

    #[test]
    fn distance_of_three_four_five_triangle() {
        assert_eq!(distance(&[0.0, 0.0], &[3.0, 4.0]).unwrap(), 5.0);
    }

    #[test]
    fn distance_rejects_mismatched_and_empty_vectors() {
        let err = distance(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(err, RecommendError::DimensionMismatch { left: 2, right: 1 }));

        let err = distance(&[], &[]).unwrap_err();
        assert!(matches!(err, RecommendError::DimensionMismatch { left: 0, right: 0 }));
    }

    #[test]
    fn rank_sorts_ascending_with_stable_ties() {
        let candidates = vec![
            doc("a/far", Some(vec![10.0, 0.0])),
            doc("a/self", Some(vec![0.0, 0.0])),
            doc("a/tie1", Some(vec![0.0, 1.0])),
            doc("a/tie2", Some(vec![1.0, 0.0])),
        ];
        let results = Ranker.rank(&candidates[1], &candidates).unwrap();
        assert_eq!(ids(&results), vec!["a/self", "a/tie1", "a/tie2", "a/far"]);
        assert_eq!(results[0].distance, 0.0);
    }

    #[test]
    fn rank_excludes_candidates_without_centroid() {
        let candidates = vec![
            doc("a/self", Some(vec![0.0, 0.0])),
            doc("a/empty", None),
            doc("a/other", Some(vec![1.0, 1.0])),
        ];
        let results = Ranker.rank(&candidates[0], &candidates).unwrap();
        assert_eq!(ids(&results), vec!["a/self", "a/other"]);
    }

    #[test]
    fn rank_rejects_target_without_centroid() {
        let candidates = vec![doc("a/empty", None), doc("a/other", Some(vec![1.0]))];
        let err = Ranker.rank(&candidates[0], &candidates).unwrap_err();
        assert!(matches!(err, RecommendError::InvalidInput(_)));
    }

    #[test]
    fn rank_rejects_empty_candidates() {
        let target = doc("a/self", Some(vec![0.0]));
        let err = Ranker.rank(&target, &[]).unwrap_err();
        assert!(matches!(err, RecommendError::InvalidInput(_)));
    }

    #[test]
    fn recommend_skips_target_even_behind_a_duplicate() {
        let candidates = vec![
            doc("a/twin", Some(vec![0.0, 0.0])),
            doc("a/self", Some(vec![0.0, 0.0])),
            doc("a/near", Some(vec![0.5, 0.0])),
        ];
        let results = Ranker.recommend(&candidates[1], &candidates, 2).unwrap();
        assert_eq!(ids(&results), vec!["a/twin", "a/near"]);
    }

    #[test]
    fn recommend_fails_when_too_few_neighbors() {
        let candidates = vec![
            doc("a/self", Some(vec![0.0])),
            doc("a/b", Some(vec![1.0])),
            doc("a/c", Some(vec![2.0])),
            doc("a/d", Some(vec![3.0])),
        ];
        let err = Ranker.recommend(&candidates[0], &candidates, 5).unwrap_err();
        assert!(matches!(
            err,
            RecommendError::InsufficientCandidates { requested: 5, available: 3 }
        ));
    }

    #[test]
    fn recommend_zero_is_empty() {
        let candidates = vec![doc("a/self", Some(vec![0.0]))];
        assert!(Ranker.recommend(&candidates[0], &candidates, 0).unwrap().is_empty());
    }
}
