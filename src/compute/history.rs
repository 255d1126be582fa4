//! Bounded snapshot history used to detect when a run has become periodic.

use std::collections::VecDeque;

use super::Grid;

/// Number of snapshots retained; periods up to `HISTORY_CAPACITY - 1` are visible.
pub const HISTORY_CAPACITY: usize = 20;

/// Fixed-capacity FIFO of deep board copies. The oldest entry is evicted
/// (and its buffer reused) once the capacity is reached.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<Grid>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// History with a custom bound (at least 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// Append a copy of `grid`, evicting the oldest snapshot when full.
    pub fn push(&mut self, grid: &Grid) {
        if self.snapshots.len() == self.capacity
            && let Some(mut recycled) = self.snapshots.pop_front()
            && recycled.copy_from(grid).is_ok()
        {
            self.snapshots.push_back(recycled);
            return;
        }
        self.snapshots.push_back(grid.clone());
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Grid> + ExactSizeIterator {
        self.snapshots.iter()
    }

    pub fn latest(&self) -> Option<&Grid> {
        self.snapshots.back()
    }

    /// Distance from the newest snapshot back to the most recent identical one.
    pub fn period(&self) -> Option<usize> {
        find_period(self.snapshots.iter())
    }

    pub fn is_periodic(&self) -> bool {
        self.period().is_some()
    }
}

/// Whether the last snapshot exactly repeats any earlier one.
///
/// Fewer than two snapshots never count as periodic.
pub fn detect_periodicity(snapshots: &[Grid]) -> bool {
    find_period(snapshots.iter()).is_some()
}

fn find_period<'a, I>(snapshots: I) -> Option<usize>
where
    I: DoubleEndedIterator<Item = &'a Grid> + ExactSizeIterator,
{
    if snapshots.len() < 2 {
        return None;
    }

    let mut newest_first = snapshots.rev();
    let last = newest_first.next()?;
    newest_first
        .position(|earlier| earlier.live_count == last.live_count && earlier.cells == last.cells)
        .map(|i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::Automaton;
    use crate::compute::grid::grid_from_ascii;

    fn blinker() -> Automaton {
        let grid = grid_from_ascii(&[".....", ".....", ".###.", ".....", "....."]);
        let mut automaton = Automaton::new(5, 5, false).unwrap();
        automaton.set_full_grid(&grid.to_rows()).unwrap();
        automaton
    }

    #[test]
    fn test_detect_periodicity_short_histories() {
        assert!(!detect_periodicity(&[]));
        let g = grid_from_ascii(&["#."]);
        assert!(!detect_periodicity(std::slice::from_ref(&g)));
    }

    #[test]
    fn test_detect_periodicity_match_anywhere() {
        let a = grid_from_ascii(&["#.", ".."]);
        let b = grid_from_ascii(&[".#", ".."]);
        let c = grid_from_ascii(&["..", "#."]);

        assert!(detect_periodicity(&[a.clone(), b.clone(), c.clone(), a.clone()]));
        assert!(detect_periodicity(&[b.clone(), b.clone()]));
        assert!(!detect_periodicity(&[a.clone(), b.clone(), c.clone()]));
        // Only the last snapshot is compared against the others.
        assert!(!detect_periodicity(&[a.clone(), a.clone(), b.clone()]));
    }

    #[test]
    fn test_period_distance() {
        let a = grid_from_ascii(&["#."]);
        let b = grid_from_ascii(&[".#"]);
        let c = grid_from_ascii(&["##"]);

        let mut history = History::new();
        for g in [&a, &b, &c, &b] {
            history.push(g);
        }
        assert_eq!(history.period(), Some(2));

        history.push(&b);
        assert_eq!(history.period(), Some(1));
    }

    #[test]
    fn test_fifo_eviction() {
        let a = grid_from_ascii(&["#."]);
        let b = grid_from_ascii(&[".#"]);
        let mut history = History::with_capacity(3);

        history.push(&a);
        history.push(&b);
        history.push(&b);
        history.push(&b);
        assert_eq!(history.len(), 3);
        assert!(history.iter().all(|g| g == &b));

        // `a` was evicted, so re-adding it is not a repeat.
        history.push(&a);
        assert!(!history.is_periodic());
    }

    #[test]
    fn test_default_capacity() {
        let g = grid_from_ascii(&["#"]);
        let mut history = History::default();
        for _ in 0..HISTORY_CAPACITY + 5 {
            history.push(&g);
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.capacity(), HISTORY_CAPACITY);
    }

    #[test]
    fn test_blinker_detected_within_three_steps() {
        let mut automaton = blinker();
        let mut history = History::with_capacity(3);

        let mut detected_at = None;
        for step in 1..=3 {
            automaton.step(1);
            history.push(automaton.grid());
            if history.is_periodic() {
                detected_at = Some(step);
                break;
            }
        }
        let step = detected_at.expect("blinker period not detected");
        assert!((2..=3).contains(&step));
        assert_eq!(history.period(), Some(2));
    }

    #[test]
    fn test_snapshots_are_deep_copies() {
        let mut automaton = blinker();
        let mut history = History::new();
        history.push(automaton.grid());
        let recorded = history.latest().unwrap().clone();

        automaton.step(1);
        assert_eq!(history.latest().unwrap(), &recorded);
        assert_ne!(history.latest().unwrap(), automaton.grid());
    }
}
