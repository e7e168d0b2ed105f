//! Dataset and solution representations.

use super::Move;
use thiserror::Error;

/// Errors raised when constructing a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    /// The dataset contains no points.
    #[error("dataset must contain at least one point")]
    Empty,

    /// Points must have at least one coordinate.
    #[error("points must have at least one dimension")]
    ZeroDimension,

    /// A row's dimension differs from the first row's.
    #[error("point {row} has dimension {got}, expected {expected}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        got: usize,
    },
}

/// Errors raised when constructing a [`Solution`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolutionError {
    /// The number of clusters must be at least one.
    #[error("cluster count must be positive")]
    ZeroClusters,

    /// The assignment does not cover the dataset exactly once.
    #[error("assignment covers {got} points, dataset has {expected}")]
    LengthMismatch { expected: usize, got: usize },

    /// An assignment entry is outside `[0, k)`.
    #[error("point {point} assigned to label {label}, valid range is 0..{k}")]
    LabelOutOfRange {
        point: usize,
        label: usize,
        k: usize,
    },
}

/// A fixed set of points in d-dimensional space.
///
/// Coordinates are stored flat (row-major) so a point is a contiguous
/// slice. The dataset never changes during a run; solutions only refer
/// to it by index.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dataset {
    coords: Vec<f64>,
    dim: usize,
}

impl Dataset {
    /// Builds a dataset from one row per point.
    ///
    /// # Examples
    ///
    /// ```
    /// use clusterheur::solution::Dataset;
    ///
    /// let data = Dataset::from_rows(&[vec![0.0, 0.0], vec![1.0, 2.0]]).unwrap();
    /// assert_eq!(data.len(), 2);
    /// assert_eq!(data.dim(), 2);
    /// ```
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, DatasetError> {
        let first = rows.first().ok_or(DatasetError::Empty)?;
        let dim = first.len();
        if dim == 0 {
            return Err(DatasetError::ZeroDimension);
        }
        let mut coords = Vec::with_capacity(rows.len() * dim);
        for (row, point) in rows.iter().enumerate() {
            if point.len() != dim {
                return Err(DatasetError::DimensionMismatch {
                    row,
                    expected: dim,
                    got: point.len(),
                });
            }
            coords.extend_from_slice(point);
        }
        Ok(Self { coords, dim })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.coords.len() / self.dim
    }

    /// True when the dataset holds no points.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Dimensionality of each point.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Coordinates of point `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn point(&self, i: usize) -> &[f64] {
        &self.coords[i * self.dim..(i + 1) * self.dim]
    }
}

/// One candidate clustering: a point-to-cluster assignment plus derived
/// centroid state.
///
/// Internally the solution keeps, for every cluster, the member count and
/// the coordinate-wise sum of its members. Centroids are derived from
/// those on demand, and a [`Move`] updates the sums in O(dim) rather than
/// rescanning the dataset.
///
/// Treated as a value type: [`Solution::apply`] returns a new solution and
/// leaves `self` untouched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    assignment: Vec<usize>,
    k: usize,
    dim: usize,
    sizes: Vec<usize>,
    sums: Vec<f64>,
}

impl Solution {
    /// Builds a solution from an explicit assignment over `data`.
    ///
    /// Every entry must be a label in `[0, k)` and the assignment must
    /// cover the dataset exactly once. Empty clusters are permitted here;
    /// whether they are acceptable is a run-level policy checked by the
    /// engine.
    pub fn new(assignment: Vec<usize>, k: usize, data: &Dataset) -> Result<Self, SolutionError> {
        if k == 0 {
            return Err(SolutionError::ZeroClusters);
        }
        if assignment.len() != data.len() {
            return Err(SolutionError::LengthMismatch {
                expected: data.len(),
                got: assignment.len(),
            });
        }

        let dim = data.dim();
        let mut sizes = vec![0usize; k];
        let mut sums = vec![0.0; k * dim];
        for (point, &label) in assignment.iter().enumerate() {
            if label >= k {
                return Err(SolutionError::LabelOutOfRange { point, label, k });
            }
            sizes[label] += 1;
            let coords = data.point(point);
            for (s, &x) in sums[label * dim..(label + 1) * dim].iter_mut().zip(coords) {
                *s += x;
            }
        }

        Ok(Self {
            assignment,
            k,
            dim,
            sizes,
            sums,
        })
    }

    /// Number of points covered by this solution.
    pub fn num_points(&self) -> usize {
        self.assignment.len()
    }

    /// Number of cluster labels (K).
    pub fn num_clusters(&self) -> usize {
        self.k
    }

    /// Cluster label of point `i`.
    pub fn label(&self, i: usize) -> usize {
        self.assignment[i]
    }

    /// The full point-to-cluster assignment.
    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    /// Number of members of cluster `c`.
    pub fn cluster_size(&self, c: usize) -> usize {
        self.sizes[c]
    }

    /// Centroid of cluster `c`, or `None` if the cluster is empty.
    pub fn centroid(&self, c: usize) -> Option<Vec<f64>> {
        if self.sizes[c] == 0 {
            return None;
        }
        let n = self.sizes[c] as f64;
        Some(
            self.sums[c * self.dim..(c + 1) * self.dim]
                .iter()
                .map(|s| s / n)
                .collect(),
        )
    }

    /// Centroids of all clusters, `None` for empty ones.
    pub fn centroids(&self) -> Vec<Option<Vec<f64>>> {
        (0..self.k).map(|c| self.centroid(c)).collect()
    }

    /// First empty cluster label, if any.
    pub fn empty_cluster(&self) -> Option<usize> {
        self.sizes.iter().position(|&s| s == 0)
    }

    /// Applies a move, returning the resulting solution.
    ///
    /// The assignment is cloned and the per-cluster sums are adjusted
    /// incrementally, so the cost of the update is bounded by the
    /// perturbation size (O(dim)), not by a full centroid recomputation.
    ///
    /// # Panics
    ///
    /// Panics if the move is structurally inconsistent with this solution
    /// (out-of-range index, stale `from` label, identical swap labels).
    /// Such a move can only come from a broken generator, so this is an
    /// internal assertion rather than a recoverable error.
    pub fn apply(&self, mv: &Move, data: &Dataset) -> Solution {
        let mut next = self.clone();
        next.apply_in_place(mv, data);
        next
    }

    fn apply_in_place(&mut self, mv: &Move, data: &Dataset) {
        match *mv {
            Move::Reassign { point, from, to } => {
                assert!(point < self.assignment.len(), "reassign of unknown point {point}");
                assert!(to < self.k, "reassign to unknown cluster {to}");
                assert_eq!(
                    self.assignment[point], from,
                    "reassign of point {point} from cluster {from}, but it is in {}",
                    self.assignment[point]
                );
                assert_ne!(from, to, "reassign of point {point} onto its own cluster");

                let coords = data.point(point);
                for d in 0..self.dim {
                    self.sums[from * self.dim + d] -= coords[d];
                    self.sums[to * self.dim + d] += coords[d];
                }
                self.sizes[from] -= 1;
                self.sizes[to] += 1;
                self.assignment[point] = to;
            }
            Move::Swap { a, b } => {
                assert!(a < self.assignment.len() && b < self.assignment.len(),
                    "swap of unknown points {a}, {b}");
                let (la, lb) = (self.assignment[a], self.assignment[b]);
                assert_ne!(la, lb, "swap of points {a} and {b} sharing cluster {la}");

                // Sizes are unchanged: each cluster loses one member and
                // gains another.
                let (pa, pb) = (data.point(a), data.point(b));
                for d in 0..self.dim {
                    self.sums[la * self.dim + d] += pb[d] - pa[d];
                    self.sums[lb * self.dim + d] += pa[d] - pb[d];
                }
                self.assignment.swap(a, b);
            }
        }
    }
}
