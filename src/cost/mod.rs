//! Cost evaluation for clustering solutions.
//!
//! Evaluators are pure: the same solution and dataset always produce the
//! same score, bit for bit. Lower is better and scores are non-negative.

use crate::solution::{Dataset, Solution};

/// Scores a solution against the underlying point coordinates.
///
/// Implementations must be deterministic and side-effect free; the engine
/// relies on re-evaluation returning identical values.
pub trait CostEvaluator: Send + Sync {
    /// Computes the cost of `solution`. Lower is better.
    fn evaluate(&self, solution: &Solution, data: &Dataset) -> f64;
}

/// Within-cluster sum of squared distances to the cluster centroid.
///
/// The standard k-means style objective. An empty cluster has no members
/// and therefore contributes zero rather than failing.
///
/// # Examples
///
/// ```
/// use clusterheur::cost::{CostEvaluator, SumOfSquares};
/// use clusterheur::solution::{Dataset, Solution};
///
/// let data = Dataset::from_rows(&[vec![0.0], vec![2.0]]).unwrap();
/// let sol = Solution::new(vec![0, 0], 1, &data).unwrap();
/// // Centroid at 1.0, each point one unit away.
/// assert_eq!(SumOfSquares.evaluate(&sol, &data), 2.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SumOfSquares;

impl CostEvaluator for SumOfSquares {
    fn evaluate(&self, solution: &Solution, data: &Dataset) -> f64 {
        let centroids = solution.centroids();
        let mut total = 0.0;
        // Fixed iteration order keeps the floating-point sum reproducible.
        for i in 0..data.len() {
            if let Some(centroid) = &centroids[solution.label(i)] {
                total += data
                    .point(i)
                    .iter()
                    .zip(centroid)
                    .map(|(x, c)| (x - c) * (x - c))
                    .sum::<f64>();
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_objective_value() {
        // Two clusters of two points each, one unit from their centroid.
        let data = Dataset::from_rows(&[
            vec![0.0, 0.0],
            vec![0.0, 2.0],
            vec![10.0, 0.0],
            vec![10.0, 2.0],
        ])
        .unwrap();
        let sol = Solution::new(vec![0, 0, 1, 1], 2, &data).unwrap();

        assert_eq!(SumOfSquares.evaluate(&sol, &data), 4.0);
    }

    #[test]
    fn test_evaluation_is_bit_identical() {
        let data = Dataset::from_rows(&[
            vec![0.3, 1.7],
            vec![2.9, 0.1],
            vec![5.2, 3.3],
            vec![1.1, 4.4],
            vec![3.7, 2.2],
        ])
        .unwrap();
        let sol = Solution::new(vec![0, 1, 1, 0, 2], 3, &data).unwrap();

        let a = SumOfSquares.evaluate(&sol, &data);
        let b = SumOfSquares.evaluate(&sol, &data);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_empty_cluster_contributes_zero() {
        let data = Dataset::from_rows(&[vec![0.0], vec![2.0]]).unwrap();
        let with_empty = Solution::new(vec![0, 0], 2, &data).unwrap();
        let without = Solution::new(vec![0, 0], 1, &data).unwrap();

        assert_eq!(
            SumOfSquares.evaluate(&with_empty, &data),
            SumOfSquares.evaluate(&without, &data)
        );
    }

    #[test]
    fn test_singleton_clusters_cost_zero() {
        let data = Dataset::from_rows(&[vec![1.0, 2.0], vec![-3.0, 4.0]]).unwrap();
        let sol = Solution::new(vec![0, 1], 2, &data).unwrap();

        assert_eq!(SumOfSquares.evaluate(&sol, &data), 0.0);
    }
}
