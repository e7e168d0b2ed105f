//! Undo/redo log of visited solutions.
//!
//! Linear history with a cursor: recording past the cursor discards any
//! redo entries beyond it. No branching, no persistence. The log owns its
//! solutions; entries are immutable once appended.

use crate::solution::Solution;
use thiserror::Error;

/// Expected, recoverable conditions at the ends of the history.
///
/// These are no-ops from the caller's point of view: the cursor does not
/// move and the displayed solution is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// `undo` was called with the cursor at the first entry.
    #[error("already at the start of history")]
    AtHistoryStart,

    /// `redo` was called with the cursor at the last entry.
    #[error("already at the end of history")]
    AtHistoryEnd,
}

/// Append-with-cursor-truncation undo/redo log.
///
/// # Examples
///
/// ```
/// use clusterheur::history::HistoryManager;
/// use clusterheur::solution::{Dataset, Solution};
///
/// let data = Dataset::from_rows(&[vec![0.0], vec![1.0]]).unwrap();
/// let a = Solution::new(vec![0, 0], 1, &data).unwrap();
/// let b = Solution::new(vec![0, 1], 2, &data).unwrap();
///
/// let mut history = HistoryManager::new();
/// history.record(a.clone());
/// history.record(b.clone());
///
/// assert_eq!(history.undo().unwrap(), &a);
/// assert_eq!(history.redo().unwrap(), &b);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HistoryManager {
    log: Vec<Solution>,
    cursor: usize,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `solution` after the cursor, discarding any redo entries,
    /// and makes it the current entry.
    pub fn record(&mut self, solution: Solution) {
        if !self.log.is_empty() {
            self.log.truncate(self.cursor + 1);
        }
        self.log.push(solution);
        self.cursor = self.log.len() - 1;
    }

    /// Moves the cursor back one entry and returns it.
    pub fn undo(&mut self) -> Result<&Solution, HistoryError> {
        if self.cursor == 0 || self.log.is_empty() {
            return Err(HistoryError::AtHistoryStart);
        }
        self.cursor -= 1;
        Ok(&self.log[self.cursor])
    }

    /// Moves the cursor forward one entry and returns it.
    pub fn redo(&mut self) -> Result<&Solution, HistoryError> {
        if self.log.is_empty() || self.cursor + 1 >= self.log.len() {
            return Err(HistoryError::AtHistoryEnd);
        }
        self.cursor += 1;
        Ok(&self.log[self.cursor])
    }

    /// The entry under the cursor, if any has been recorded.
    pub fn current(&self) -> Option<&Solution> {
        self.log.get(self.cursor)
    }

    /// Number of entries in the log (including undone ones still
    /// available for redo).
    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Cursor position of the current entry.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Read-only view of the recorded entries, oldest first.
    pub fn entries(&self) -> &[Solution] {
        &self.log
    }

    pub fn can_undo(&self) -> bool {
        !self.log.is_empty() && self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.log.is_empty() && self.cursor + 1 < self.log.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::Dataset;

    fn solutions() -> (Dataset, Vec<Solution>) {
        let data = Dataset::from_rows(&[vec![0.0], vec![1.0], vec![2.0]]).unwrap();
        let sols = vec![
            Solution::new(vec![0, 0, 0], 1, &data).unwrap(),
            Solution::new(vec![0, 0, 1], 2, &data).unwrap(),
            Solution::new(vec![0, 1, 1], 2, &data).unwrap(),
        ];
        (data, sols)
    }

    #[test]
    fn test_empty_history() {
        let mut history = HistoryManager::new();
        assert!(history.is_empty());
        assert_eq!(history.current(), None);
        assert_eq!(history.undo(), Err(HistoryError::AtHistoryStart));
        assert_eq!(history.redo(), Err(HistoryError::AtHistoryEnd));
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let (_data, sols) = solutions();
        let mut history = HistoryManager::new();
        history.record(sols[0].clone());
        history.record(sols[1].clone());

        // undo after record(S) returns the entry prior to S...
        assert_eq!(history.undo().unwrap(), &sols[0]);
        // ...and redo returns S again.
        assert_eq!(history.redo().unwrap(), &sols[1]);
        assert_eq!(history.current(), Some(&sols[1]));
    }

    #[test]
    fn test_undo_at_start_is_an_error() {
        let (_data, sols) = solutions();
        let mut history = HistoryManager::new();
        history.record(sols[0].clone());

        assert_eq!(history.undo(), Err(HistoryError::AtHistoryStart));
        // Failed undo leaves the cursor where it was.
        assert_eq!(history.current(), Some(&sols[0]));
    }

    #[test]
    fn test_redo_at_end_is_an_error() {
        let (_data, sols) = solutions();
        let mut history = HistoryManager::new();
        history.record(sols[0].clone());
        history.record(sols[1].clone());

        assert_eq!(history.redo(), Err(HistoryError::AtHistoryEnd));
        assert_eq!(history.current(), Some(&sols[1]));
    }

    #[test]
    fn test_record_after_undo_discards_redo_entries() {
        let (_data, sols) = solutions();
        let mut history = HistoryManager::new();
        history.record(sols[0].clone());
        history.record(sols[1].clone());

        history.undo().unwrap();
        history.record(sols[2].clone());

        // sols[1] is gone: redo has nothing to return.
        assert_eq!(history.len(), 2);
        assert_eq!(history.redo(), Err(HistoryError::AtHistoryEnd));
        assert_eq!(history.undo().unwrap(), &sols[0]);
        assert_eq!(history.redo().unwrap(), &sols[2]);
    }

    #[test]
    fn test_cursor_tracks_current_entry() {
        let (_data, sols) = solutions();
        let mut history = HistoryManager::new();
        for sol in &sols {
            history.record(sol.clone());
        }

        assert_eq!(history.cursor(), 2);
        assert!(history.can_undo());
        assert!(!history.can_redo());

        history.undo().unwrap();
        history.undo().unwrap();
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_undo());
        assert!(history.can_redo());
    }
}
