//! Neighborhood generation.
//!
//! A [`NeighborGenerator`] produces the candidates reachable from a
//! solution by one elementary move. The moves themselves are drawn up
//! front (they are cheap descriptors); the candidate solutions are
//! materialized lazily as the [`Neighborhood`] iterator is consumed, so
//! callers that stop early never pay for the rest.
//!
//! Each call to [`NeighborGenerator::generate`] yields a fresh, finite
//! sequence; a `Neighborhood` is not restartable.

use crate::solution::{Dataset, Move, Solution};
use rand::Rng;

/// How the neighborhood of a solution is explored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeighborStrategy {
    /// Enumerate every legal single-point reassignment, in ascending
    /// (point index, target label) order. Suited to steepest-descent
    /// Hill Climbing on small search spaces (N x (K-1) candidates).
    Exhaustive,

    /// Draw up to `count` random legal moves (reassignments and swaps).
    /// Used when the full neighborhood is too large to scan, and always
    /// by Simulated Annealing, which needs one candidate per iteration.
    Sampled { count: usize },
}

/// Produces candidate solutions one elementary move away.
#[derive(Debug, Clone, Copy)]
pub struct NeighborGenerator {
    strategy: NeighborStrategy,
    allow_empty: bool,
}

/// Cap on rejection-sampling attempts relative to the requested sample
/// size, so degenerate solutions (e.g. K = 1) terminate with a short or
/// empty neighborhood instead of spinning.
const SAMPLE_ATTEMPT_FACTOR: usize = 20;

impl NeighborGenerator {
    pub fn new(strategy: NeighborStrategy, allow_empty: bool) -> Self {
        Self {
            strategy,
            allow_empty,
        }
    }

    /// Generates the neighborhood of `solution` under this generator's
    /// strategy. Every yielded move is legal: it never empties a cluster
    /// while the empty-cluster policy forbids it.
    pub fn generate<'a, R: Rng + ?Sized>(
        &self,
        solution: &'a Solution,
        data: &'a Dataset,
        rng: &mut R,
    ) -> Neighborhood<'a> {
        let moves = match self.strategy {
            NeighborStrategy::Exhaustive => self.enumerate(solution),
            NeighborStrategy::Sampled { count } => self.sample(solution, count, rng),
        };
        Neighborhood {
            solution,
            data,
            moves: moves.into_iter(),
        }
    }

    fn enumerate(&self, solution: &Solution) -> Vec<Move> {
        let k = solution.num_clusters();
        let mut moves = Vec::new();
        for point in 0..solution.num_points() {
            let from = solution.label(point);
            for to in 0..k {
                if to == from {
                    continue;
                }
                let mv = Move::Reassign { point, from, to };
                if mv.is_legal(solution, self.allow_empty) {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    fn sample<R: Rng + ?Sized>(
        &self,
        solution: &Solution,
        count: usize,
        rng: &mut R,
    ) -> Vec<Move> {
        let n = solution.num_points();
        let k = solution.num_clusters();
        let mut moves = Vec::with_capacity(count);
        if k < 2 {
            return moves;
        }

        let mut attempts = 0;
        let max_attempts = SAMPLE_ATTEMPT_FACTOR * count.max(1);
        while moves.len() < count && attempts < max_attempts {
            attempts += 1;
            let mv = if rng.random_range(0..2) == 0 {
                let point = rng.random_range(0..n);
                let from = solution.label(point);
                // Uniform over the k-1 other labels.
                let mut to = rng.random_range(0..k - 1);
                if to >= from {
                    to += 1;
                }
                Move::Reassign { point, from, to }
            } else {
                Move::Swap {
                    a: rng.random_range(0..n),
                    b: rng.random_range(0..n),
                }
            };
            if mv.is_legal(solution, self.allow_empty) {
                moves.push(mv);
            }
        }
        moves
    }
}

/// Lazy, finite sequence of `(Move, candidate Solution)` pairs.
pub struct Neighborhood<'a> {
    solution: &'a Solution,
    data: &'a Dataset,
    moves: std::vec::IntoIter<Move>,
}

impl Iterator for Neighborhood<'_> {
    type Item = (Move, Solution);

    fn next(&mut self) -> Option<Self::Item> {
        let mv = self.moves.next()?;
        let candidate = self.solution.apply(&mv, self.data);
        Some((mv, candidate))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.moves.size_hint()
    }
}

impl ExactSizeIterator for Neighborhood<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn dataset(n: usize) -> Dataset {
        let rows: Vec<Vec<f64>> = (0..n).map(|i| vec![i as f64, (i % 3) as f64]).collect();
        Dataset::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_exhaustive_counts_all_reassignments() {
        let data = dataset(6);
        let sol = Solution::new(vec![0, 0, 1, 1, 2, 2], 3, &data).unwrap();
        let generator = NeighborGenerator::new(NeighborStrategy::Exhaustive, false);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        // No singleton clusters: all N * (K-1) reassignments are legal.
        let candidates: Vec<_> = generator.generate(&sol, &data, &mut rng).collect();
        assert_eq!(candidates.len(), 6 * 2);
    }

    #[test]
    fn test_exhaustive_order_is_point_then_label() {
        let data = dataset(4);
        let sol = Solution::new(vec![1, 0, 1, 0], 2, &data).unwrap();
        let generator = NeighborGenerator::new(NeighborStrategy::Exhaustive, true);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let moves: Vec<_> = generator
            .generate(&sol, &data, &mut rng)
            .map(|(mv, _)| mv)
            .collect();
        assert_eq!(
            moves,
            vec![
                Move::Reassign {
                    point: 0,
                    from: 1,
                    to: 0
                },
                Move::Reassign {
                    point: 1,
                    from: 0,
                    to: 1
                },
                Move::Reassign {
                    point: 2,
                    from: 1,
                    to: 0
                },
                Move::Reassign {
                    point: 3,
                    from: 0,
                    to: 1
                },
            ]
        );
    }

    #[test]
    fn test_exhaustive_skips_moves_emptying_singletons() {
        let data = dataset(3);
        let sol = Solution::new(vec![0, 1, 1], 2, &data).unwrap();
        let generator = NeighborGenerator::new(NeighborStrategy::Exhaustive, false);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        // Point 0 is alone in cluster 0; only points 1 and 2 may move.
        let moves: Vec<_> = generator
            .generate(&sol, &data, &mut rng)
            .map(|(mv, _)| mv)
            .collect();
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|mv| !matches!(
            mv,
            Move::Reassign { point: 0, .. }
        )));
    }

    #[test]
    fn test_sampled_yields_requested_count() {
        let data = dataset(10);
        let sol = Solution::new(vec![0, 1, 0, 1, 0, 1, 0, 1, 0, 1], 2, &data).unwrap();
        let generator = NeighborGenerator::new(NeighborStrategy::Sampled { count: 8 }, false);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let candidates: Vec<_> = generator.generate(&sol, &data, &mut rng).collect();
        assert_eq!(candidates.len(), 8);
    }

    #[test]
    fn test_sampled_moves_are_legal() {
        let data = dataset(8);
        // Cluster 0 is a singleton: sampling must never empty it.
        let sol = Solution::new(vec![0, 1, 1, 1, 2, 2, 2, 2], 3, &data).unwrap();
        let generator = NeighborGenerator::new(NeighborStrategy::Sampled { count: 64 }, false);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for (mv, candidate) in generator.generate(&sol, &data, &mut rng) {
            assert!(mv.is_legal(&sol, false));
            assert_eq!(candidate.empty_cluster(), None);
        }
    }

    #[test]
    fn test_single_cluster_has_empty_neighborhood() {
        let data = dataset(5);
        let sol = Solution::new(vec![0; 5], 1, &data).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let exhaustive = NeighborGenerator::new(NeighborStrategy::Exhaustive, true);
        assert_eq!(exhaustive.generate(&sol, &data, &mut rng).count(), 0);

        let sampled = NeighborGenerator::new(NeighborStrategy::Sampled { count: 4 }, true);
        assert_eq!(sampled.generate(&sol, &data, &mut rng).count(), 0);
    }

    #[test]
    fn test_candidates_differ_from_origin_by_one_move() {
        let data = dataset(6);
        let sol = Solution::new(vec![0, 0, 1, 1, 2, 2], 3, &data).unwrap();
        let generator = NeighborGenerator::new(NeighborStrategy::Exhaustive, false);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        for (mv, candidate) in generator.generate(&sol, &data, &mut rng) {
            let Move::Reassign { point, to, .. } = mv else {
                panic!("exhaustive neighborhoods contain only reassignments");
            };
            assert_eq!(candidate.label(point), to);
            let differing = sol
                .assignment()
                .iter()
                .zip(candidate.assignment())
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(differing, 1);
        }
    }
}
