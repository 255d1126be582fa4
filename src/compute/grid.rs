//! Board primitive: a fixed-size boolean matrix with a running live-cell count.

use std::fmt;

use rand::Rng;

use super::LifeError;

/// Characters drawn for a live cell when rendering.
pub const ALIVE_GLYPH: &str = "[]";
/// Characters drawn for a dead cell when rendering.
pub const DEAD_GLYPH: &str = "  ";

/// Rectangular boolean board.
///
/// Cells are stored row-major: `cells[y * width + x]`. `live_count` always
/// equals the number of `true` cells after any mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) cells: Vec<bool>,
    pub(crate) live_count: usize,
}

impl Grid {
    /// Create an all-dead board.
    pub fn new(width: usize, height: usize) -> Result<Self, LifeError> {
        if width < 1 || height < 1 {
            return Err(LifeError::InvalidSize { width, height });
        }

        Ok(Self {
            width,
            height,
            cells: vec![false; width * height],
            live_count: 0,
        })
    }

    /// Build a board from row vectors. The first row fixes the width.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self, LifeError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut grid = Self::new(width, height)?;
        grid.set_full_grid(rows)?;
        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Maintained number of live cells.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    /// Full rescan of the board. Always equal to `live_count()`.
    pub fn count_live_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    #[inline]
    pub(crate) fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Unchecked read; callers guarantee `x < width && y < height`.
    #[inline]
    pub(crate) fn at(&self, x: usize, y: usize) -> bool {
        self.cells[self.idx(x, y)]
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<(), LifeError> {
        if x >= self.width || y >= self.height {
            return Err(LifeError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Read a cell.
    pub fn get(&self, x: usize, y: usize) -> Result<bool, LifeError> {
        self.check_bounds(x, y)?;
        Ok(self.at(x, y))
    }

    /// Write a cell, adjusting the live count by the old/new delta.
    pub fn set_cell(&mut self, x: usize, y: usize, state: bool) -> Result<(), LifeError> {
        self.check_bounds(x, y)?;
        let idx = self.idx(x, y);
        match (self.cells[idx], state) {
            (true, false) => self.live_count -= 1,
            (false, true) => self.live_count += 1,
            _ => {}
        }
        self.cells[idx] = state;
        Ok(())
    }

    /// Replace every cell from row vectors of identical shape.
    ///
    /// Goes through `set_cell` for each position after clearing, so the live
    /// count is rebuilt from scratch.
    pub fn set_full_grid(&mut self, source: &[Vec<bool>]) -> Result<(), LifeError> {
        let found_width = source.first().map_or(0, Vec::len);
        if source.len() != self.height || found_width != self.width {
            return Err(LifeError::SizeMismatch {
                expected: self.dims(),
                found: (found_width, source.len()),
            });
        }
        if let Some((row, cells)) = source
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.width)
        {
            return Err(LifeError::NotRectangular {
                row,
                expected: self.width,
                found: cells.len(),
            });
        }

        self.clear();
        for (y, row) in source.iter().enumerate() {
            for (x, &state) in row.iter().enumerate() {
                self.set_cell(x, y, state)?;
            }
        }
        Ok(())
    }

    /// Copy another board of the same shape into this one, reusing the allocation.
    pub fn copy_from(&mut self, other: &Grid) -> Result<(), LifeError> {
        if self.dims() != other.dims() {
            return Err(LifeError::SizeMismatch {
                expected: self.dims(),
                found: other.dims(),
            });
        }
        self.cells.copy_from_slice(&other.cells);
        self.live_count = other.live_count;
        Ok(())
    }

    /// Independently turn each cell alive with probability `percent / 100`.
    ///
    /// Cells that are not picked keep their current state. `percent` is
    /// clamped to `[0, 100]`.
    pub fn random_fill<R: Rng + ?Sized>(&mut self, percent: f32, rng: &mut R) {
        for idx in 0..self.cells.len() {
            if percent_chance(rng, percent) && !self.cells[idx] {
                self.cells[idx] = true;
                self.live_count += 1;
            }
        }
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.live_count = 0;
    }

    /// Iterate rows as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width)
    }

    /// Row vectors suitable for `set_full_grid`.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.rows().map(<[bool]>::to_vec).collect()
    }

    /// Whether any live cell sits in the first/last row or column.
    pub fn touches_border(&self) -> bool {
        if self.live_count == 0 {
            return false;
        }
        let last_row = self.height - 1;
        let last_col = self.width - 1;
        (0..self.width).any(|x| self.at(x, 0) || self.at(x, last_row))
            || (0..self.height).any(|y| self.at(0, y) || self.at(last_col, y))
    }
}

/// Bordered text block: `+--…--+` framing, two characters per cell.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "-".repeat(2 * self.width);
        writeln!(f, "+{border}+")?;
        for row in self.rows() {
            f.write_str("|")?;
            for &alive in row {
                f.write_str(if alive { ALIVE_GLYPH } else { DEAD_GLYPH })?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "+{border}+")
    }
}

/// Bernoulli trial with a percentage in `[0, 100]`; out-of-range values clamp.
#[inline]
pub(crate) fn percent_chance<R: Rng + ?Sized>(rng: &mut R, percent: f32) -> bool {
    if percent.is_nan() || percent <= 0.0 {
        return false;
    }
    if percent >= 100.0 {
        return true;
    }
    rng.gen_bool(f64::from(percent) / 100.0)
}

/// Parse `#`/`.` rows into a grid.
#[cfg(test)]
pub(crate) fn grid_from_ascii(rows: &[&str]) -> Grid {
    let rows: Vec<Vec<bool>> = rows
        .iter()
        .map(|r| r.bytes().map(|b| b == b'#').collect())
        .collect();
    Grid::from_rows(&rows).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert_eq!(
            Grid::new(0, 5),
            Err(LifeError::InvalidSize {
                width: 0,
                height: 5
            })
        );
        assert!(Grid::new(3, 0).is_err());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn test_set_cell_tracks_live_count() {
        let mut grid = Grid::new(4, 3).unwrap();
        grid.set_cell(1, 1, true).unwrap();
        grid.set_cell(1, 1, true).unwrap();
        grid.set_cell(3, 2, true).unwrap();
        assert_eq!(grid.live_count(), 2);

        grid.set_cell(1, 1, false).unwrap();
        assert_eq!(grid.live_count(), 1);
        assert_eq!(grid.count_live_cells(), 1);
    }

    #[test]
    fn test_set_cell_out_of_bounds() {
        let mut grid = Grid::new(4, 3).unwrap();
        assert!(matches!(
            grid.set_cell(4, 0, true),
            Err(LifeError::OutOfBounds { x: 4, y: 0, .. })
        ));
        assert!(grid.set_cell(0, 3, true).is_err());
        assert!(grid.get(10, 10).is_err());
    }

    #[test]
    fn test_set_full_grid_rebuilds_count() {
        let mut grid = grid_from_ascii(&["##.", "...", "..#"]);
        assert_eq!(grid.live_count(), 3);

        let rows = vec![
            vec![true, false, false],
            vec![true, true, true],
            vec![false, false, true],
        ];
        grid.set_full_grid(&rows).unwrap();
        assert_eq!(grid.live_count(), 5);
        assert_eq!(grid.count_live_cells(), 5);
        assert_eq!(grid.to_rows(), rows);
    }

    #[test]
    fn test_set_full_grid_errors() {
        let mut grid = Grid::new(3, 2).unwrap();

        let too_short = vec![vec![false; 3]];
        assert!(matches!(
            grid.set_full_grid(&too_short),
            Err(LifeError::SizeMismatch { .. })
        ));

        let ragged = vec![vec![false; 3], vec![false; 2]];
        assert_eq!(
            grid.set_full_grid(&ragged),
            Err(LifeError::NotRectangular {
                row: 1,
                expected: 3,
                found: 2
            })
        );

        assert!(matches!(
            grid.set_full_grid(&[]),
            Err(LifeError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_random_fill_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(10, 10).unwrap();

        grid.random_fill(0.0, &mut rng);
        assert_eq!(grid.live_count(), 0);

        grid.random_fill(-20.0, &mut rng);
        assert_eq!(grid.live_count(), 0);

        grid.random_fill(250.0, &mut rng);
        assert_eq!(grid.live_count(), 100);
        assert_eq!(grid.count_live_cells(), 100);
    }

    #[test]
    fn test_random_fill_keeps_live_cells() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = Grid::new(8, 8).unwrap();
        grid.set_cell(2, 3, true).unwrap();

        grid.random_fill(30.0, &mut rng);
        assert!(grid.get(2, 3).unwrap());
        assert_eq!(grid.live_count(), grid.count_live_cells());
    }

    #[test]
    fn test_clear() {
        let mut grid = grid_from_ascii(&["###", "#.#"]);
        grid.clear();
        assert_eq!(grid.live_count(), 0);
        assert_eq!(grid.dims(), (3, 2));
        assert_eq!(grid.count_live_cells(), 0);
    }

    #[test]
    fn test_touches_border() {
        assert!(!grid_from_ascii(&["....", ".##.", "...."]).touches_border());
        assert!(grid_from_ascii(&["#...", "....", "...."]).touches_border());
        assert!(grid_from_ascii(&["....", "...#", "...."]).touches_border());
        assert!(grid_from_ascii(&["....", "....", ".#.."]).touches_border());
        assert!(!Grid::new(3, 3).unwrap().touches_border());
    }

    #[test]
    fn test_display_format() {
        let grid = grid_from_ascii(&["#.", ".#"]);
        let expected = "+----+\n|[]  |\n|  []|\n+----+\n";
        assert_eq!(grid.to_string(), expected);
    }

    #[test]
    fn test_copy_from_size_mismatch() {
        let mut a = Grid::new(3, 3).unwrap();
        let b = Grid::new(2, 3).unwrap();
        assert!(a.copy_from(&b).is_err());

        let c = grid_from_ascii(&["#..", ".#.", "..#"]);
        a.copy_from(&c).unwrap();
        assert_eq!(a, c);
    }
}
