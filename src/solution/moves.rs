//! Elementary perturbations of a solution.

use super::Solution;

/// One elementary move between neighboring solutions.
///
/// A move describes the perturbation without materializing the resulting
/// solution, so large neighborhoods can be enumerated or sampled cheaply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Move {
    /// Reassign `point` from cluster `from` to cluster `to`.
    Reassign {
        point: usize,
        from: usize,
        to: usize,
    },

    /// Swap the cluster membership of points `a` and `b`.
    Swap { a: usize, b: usize },
}

impl Move {
    /// The move that undoes this one.
    ///
    /// Applying a legal move and then its inverse restores the original
    /// assignment (and, for integer-exact coordinates, the exact centroid
    /// state).
    pub fn inverse(&self) -> Move {
        match *self {
            Move::Reassign { point, from, to } => Move::Reassign {
                point,
                from: to,
                to: from,
            },
            Move::Swap { a, b } => Move::Swap { a, b },
        }
    }

    /// Whether this move may be applied to `solution`.
    ///
    /// A reassignment is legal when its indices are in range, its `from`
    /// label matches the current assignment, it actually changes the
    /// label, and it does not empty a cluster while `allow_empty` is
    /// false. A swap is legal when both points exist and sit in different
    /// clusters; it never changes cluster sizes.
    pub fn is_legal(&self, solution: &Solution, allow_empty: bool) -> bool {
        match *self {
            Move::Reassign { point, from, to } => {
                point < solution.num_points()
                    && to < solution.num_clusters()
                    && solution.label(point) == from
                    && from != to
                    && (allow_empty || solution.cluster_size(from) > 1)
            }
            Move::Swap { a, b } => {
                a < solution.num_points()
                    && b < solution.num_points()
                    && solution.label(a) != solution.label(b)
            }
        }
    }
}
