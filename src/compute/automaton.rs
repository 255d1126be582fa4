//! Game of Life automaton - owns the board and applies the B3/S23 rule.
//!
//! Updates are synchronous: every step computes the full next generation
//! into a scratch buffer from the untouched current board, then swaps.

use rand::Rng;

use super::{Grid, LifeError};

/// Board plus the edge policy it was built with.
#[derive(Debug, Clone)]
pub struct Automaton {
    grid: Grid,
    /// Next-generation buffer, same shape as `grid.cells`.
    scratch: Vec<bool>,
    wrap_edges: bool,
}

impl Automaton {
    /// Create an empty board. `wrap_edges` selects toroidal neighbor lookup and
    /// cannot be changed afterwards.
    pub fn new(width: usize, height: usize, wrap_edges: bool) -> Result<Self, LifeError> {
        let grid = Grid::new(width, height)?;
        let scratch = vec![false; grid.cells.len()];
        Ok(Self {
            grid,
            scratch,
            wrap_edges,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn wrap_edges(&self) -> bool {
        self.wrap_edges
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height
    }

    #[inline]
    pub fn live_count(&self) -> usize {
        self.grid.live_count
    }

    pub fn set_cell(&mut self, x: usize, y: usize, state: bool) -> Result<(), LifeError> {
        self.grid.set_cell(x, y, state)
    }

    pub fn set_full_grid(&mut self, source: &[Vec<bool>]) -> Result<(), LifeError> {
        self.grid.set_full_grid(source)
    }

    pub fn random_fill<R: Rng + ?Sized>(&mut self, percent: f32, rng: &mut R) {
        self.grid.random_fill(percent, rng);
    }

    /// Kill every cell, keeping dimensions and edge policy.
    pub fn clear(&mut self) {
        self.grid.clear();
    }

    /// Live cells in the Moore neighborhood of `(x, y)`.
    pub fn count_neighbors(&self, x: usize, y: usize) -> Result<u8, LifeError> {
        self.grid.get(x, y)?;
        Ok(self.neighbors(x, y))
    }

    /// Unchecked neighbor count.
    fn neighbors(&self, x: usize, y: usize) -> u8 {
        let g = &self.grid;
        let (w, h) = (g.width, g.height);

        if self.wrap_edges {
            let left = if x == 0 { w - 1 } else { x - 1 };
            let right = if x + 1 == w { 0 } else { x + 1 };
            let up = if y == 0 { h - 1 } else { y - 1 };
            let down = if y + 1 == h { 0 } else { y + 1 };

            // All eight are summed even when they alias on 1- or 2-wide boards.
            [
                (left, up),
                (x, up),
                (right, up),
                (left, y),
                (right, y),
                (left, down),
                (x, down),
                (right, down),
            ]
            .iter()
            .map(|&(nx, ny)| u8::from(g.at(nx, ny)))
            .sum()
        } else {
            let x_lo = x.saturating_sub(1);
            let x_hi = (x + 1).min(w - 1);
            let y_lo = y.saturating_sub(1);
            let y_hi = (y + 1).min(h - 1);

            let mut count = 0u8;
            for ny in y_lo..=y_hi {
                for nx in x_lo..=x_hi {
                    if (nx, ny) != (x, y) && g.at(nx, ny) {
                        count += 1;
                    }
                }
            }
            count
        }
    }

    /// Advance `steps` generations.
    pub fn step(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step_once();
        }
    }

    fn step_once(&mut self) {
        let (w, h) = (self.grid.width, self.grid.height);
        let mut live = self.grid.live_count;

        for y in 0..h {
            for x in 0..w {
                let idx = y * w + x;
                let alive = self.grid.cells[idx];
                let next = match (alive, self.neighbors(x, y)) {
                    (true, 2) | (_, 3) => true,
                    _ => false,
                };
                match (alive, next) {
                    (true, false) => live -= 1,
                    (false, true) => live += 1,
                    _ => {}
                }
                self.scratch[idx] = next;
            }
        }

        std::mem::swap(&mut self.grid.cells, &mut self.scratch);
        self.grid.live_count = live;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::grid::grid_from_ascii;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn automaton_from(rows: &[&str], wrap: bool) -> Automaton {
        let grid = grid_from_ascii(rows);
        let mut automaton = Automaton::new(grid.width(), grid.height(), wrap).unwrap();
        automaton.set_full_grid(&grid.to_rows()).unwrap();
        automaton
    }

    #[test]
    fn test_invalid_size() {
        assert!(Automaton::new(0, 4, false).is_err());
        assert!(Automaton::new(4, 0, true).is_err());
    }

    #[test]
    fn test_block_is_still_life() {
        let rows = ["......", "......", "..##..", "..##..", "......", "......"];
        let mut automaton = automaton_from(&rows, false);
        let before = automaton.grid().clone();

        for n in [1, 2, 5, 17] {
            automaton.step(n);
            assert_eq!(automaton.grid(), &before);
        }
        assert_eq!(automaton.live_count(), 4);
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = [".....", ".....", ".###.", ".....", "....."];
        let vertical = [".....", "..#..", "..#..", "..#..", "....."];
        let mut automaton = automaton_from(&horizontal, false);

        automaton.step(1);
        assert_eq!(automaton.grid(), &grid_from_ascii(&vertical));
        automaton.step(1);
        assert_eq!(automaton.grid(), &grid_from_ascii(&horizontal));
        assert_eq!(automaton.live_count(), 3);
    }

    #[test]
    fn test_neighbors_no_wrap_corners() {
        let automaton = automaton_from(&["###", "###", "###"], false);
        assert_eq!(automaton.count_neighbors(0, 0).unwrap(), 3);
        assert_eq!(automaton.count_neighbors(1, 0).unwrap(), 5);
        assert_eq!(automaton.count_neighbors(1, 1).unwrap(), 8);
        assert_eq!(automaton.count_neighbors(2, 2).unwrap(), 3);
    }

    #[test]
    fn test_neighbors_wrap_corners() {
        let rows = ["#...#", ".....", ".....", "#...#"];
        let wrapped = automaton_from(&rows, true);
        let bounded = automaton_from(&rows, false);

        assert_eq!(wrapped.count_neighbors(0, 0).unwrap(), 3);
        assert_eq!(bounded.count_neighbors(0, 0).unwrap(), 0);
        assert_eq!(wrapped.count_neighbors(2, 0).unwrap(), 0);
    }

    #[test]
    fn test_neighbors_out_of_bounds() {
        let automaton = Automaton::new(3, 3, true).unwrap();
        assert!(matches!(
            automaton.count_neighbors(3, 1),
            Err(LifeError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_glider_wraps_around_torus() {
        let glider = [
            ".#....", "..#...", "###...", "......", "......", "......",
        ];
        let mut automaton = automaton_from(&glider, true);
        let start = automaton.grid().clone();

        // A glider shifts by one cell diagonally every 4 generations; on a
        // 6x6 torus it is back home after 24.
        automaton.step(24);
        assert_eq!(automaton.grid(), &start);
        assert_eq!(automaton.live_count(), 5);
    }

    #[test]
    fn test_glider_dies_into_block_without_wrap() {
        let glider = [
            ".#....", "..#...", "###...", "......", "......", "......",
        ];
        let mut automaton = automaton_from(&glider, false);
        automaton.step(40);

        let settled = automaton.grid().clone();
        automaton.step(1);
        assert_eq!(automaton.grid(), &settled);
        assert_eq!(automaton.live_count(), 4);
    }

    #[test]
    fn test_clear_keeps_shape() {
        let mut automaton = automaton_from(&["##.", ".##"], true);
        automaton.clear();
        assert_eq!(automaton.live_count(), 0);
        assert_eq!((automaton.width(), automaton.height()), (3, 2));
        assert!(automaton.wrap_edges());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Set(usize, usize, bool),
        Fill(f32),
        Step(usize),
        Clear,
        Replace(Vec<bool>),
    }

    const W: usize = 7;
    const H: usize = 5;

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..W, 0..H, any::<bool>()).prop_map(|(x, y, s)| Op::Set(x, y, s)),
            (0.0f32..100.0).prop_map(Op::Fill),
            (1usize..4).prop_map(Op::Step),
            Just(Op::Clear),
            prop::collection::vec(any::<bool>(), W * H).prop_map(Op::Replace),
        ]
    }

    proptest! {
        #[test]
        fn prop_live_count_matches_rescan(
            ops in prop::collection::vec(op_strategy(), 1..40),
            wrap in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut automaton = Automaton::new(W, H, wrap).unwrap();

            for op in ops {
                match op {
                    Op::Set(x, y, s) => automaton.set_cell(x, y, s).unwrap(),
                    Op::Fill(p) => automaton.random_fill(p, &mut rng),
                    Op::Step(n) => automaton.step(n),
                    Op::Clear => automaton.clear(),
                    Op::Replace(cells) => {
                        let rows: Vec<Vec<bool>> = cells.chunks(W).map(<[bool]>::to_vec).collect();
                        automaton.set_full_grid(&rows).unwrap();
                    }
                }
                prop_assert_eq!(automaton.live_count(), automaton.grid().count_live_cells());
            }
        }
    }
}
