// grid.rs - Grid type and grid primitives for the simulation

use rand::Rng;

pub type TRow = Vec<u8>;

/// A fixed `rows × cols` matrix of cell values.
///
/// Every pattern keeps cells in `{0, 1}`. Rows are owned separately, so a
/// clone never shares storage with the original.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<TRow>,
}

impl Grid {
    /// Every cell dead.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![0; cols]; rows],
        }
    }

    /// Each cell independently live with probability `live_probability`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, live_probability: f64, rng: &mut R) -> Self {
        let p = if live_probability.is_finite() { live_probability.clamp(0.0, 1.0) } else { 0.0 };
        let cells = (0..rows)
            .map(|_| (0..cols).map(|_| u8::from(rng.gen_bool(p))).collect())
            .collect();
        Self { rows, cols, cells }
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn is_live(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(|v| v > 0)
    }

    /// Out-of-range writes are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = value;
        }
    }

    pub fn row(&self, row: usize) -> Option<&[u8]> {
        self.cells.get(row).map(Vec::as_slice)
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.iter().map(Vec::as_slice)
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v > 0).count()
    }

    /// Copy `seed` onto the grid with its top-left corner at `origin`.
    /// Cells that fall outside the grid are dropped.
    pub fn stamp(&mut self, seed: &Seed, origin: (usize, usize)) {
        for &(dr, dc) in seed.cells {
            self.set(origin.0.saturating_add(dr), origin.1.saturating_add(dc), 1);
        }
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [TRow] {
        &mut self.cells
    }
}

/// A named arrangement of live cells, offsets relative to its top-left corner.
pub struct Seed {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

impl Seed {
    /// `(height, width)` of the bounding box.
    pub fn extent(&self) -> (usize, usize) {
        self.cells.iter().fold((0, 0), |(h, w), &(r, c)| (h.max(r + 1), w.max(c + 1)))
    }
}

pub const BLINKER: Seed = Seed {
    name: "Blinker",
    cells: &[(0, 0), (0, 1), (0, 2)],
};

pub const GLIDER: Seed = Seed {
    name: "Glider",
    cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
};

pub const TOAD: Seed = Seed {
    name: "Toad",
    cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
};

pub const BEACON: Seed = Seed {
    name: "Beacon",
    cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
};

pub const R_PENTOMINO: Seed = Seed {
    name: "R-pentomino",
    cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
};

pub const SEEDS: &[Seed] = &[BLINKER, GLIDER, TOAD, BEACON, R_PENTOMINO];

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn empty_grid_has_declared_size() {
        let grid = Grid::empty(7, 53);
        assert_eq!(grid.dimensions(), (7, 53));
        assert_eq!(grid.iter_rows().count(), 7);
        assert!(grid.iter_rows().all(|row| row.len() == 53));
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn rows_are_not_shared() {
        let mut grid = Grid::empty(3, 3);
        grid.set(0, 0, 1);
        assert!(grid.is_live(0, 0));
        assert!(!grid.is_live(1, 0));
        assert!(!grid.is_live(2, 0));
    }

    #[test]
    fn out_of_range_access_is_harmless() {
        let mut grid = Grid::empty(2, 2);
        grid.set(5, 5, 1);
        assert_eq!(grid.get(5, 5), None);
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn random_grid_density_is_close_to_probability() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = Grid::random(100, 100, 0.3, &mut rng);
        let density = grid.live_count() as f64 / 10_000.0;
        assert!((0.25..0.35).contains(&density), "density {density}");
        assert!(grid.iter_rows().flatten().all(|&v| v <= 1));
    }

    #[test]
    fn random_grid_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Grid::random(4, 4, 0.0, &mut rng).live_count(), 0);
        assert_eq!(Grid::random(4, 4, 1.0, &mut rng).live_count(), 16);
        assert_eq!(Grid::random(4, 4, f64::NAN, &mut rng).live_count(), 0);
    }

    #[test]
    fn stamp_clips_at_the_edge() {
        let mut grid = Grid::empty(3, 3);
        grid.stamp(&BEACON, (1, 1));
        // only (1,1) (1,2) (2,1) (2,2) fit
        assert_eq!(grid.live_count(), 4);
        assert_eq!(BEACON.extent(), (4, 4));
        assert_eq!(BLINKER.extent(), (1, 3));
    }

    #[test]
    fn stamp_far_outside_is_dropped() {
        let mut grid = Grid::empty(3, 3);
        grid.stamp(&TOAD, (usize::MAX, usize::MAX - 1));
        grid.stamp(&GLIDER, (0, usize::MAX));
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn seed_table_fits_a_calendar() {
        for seed in SEEDS {
            let (height, width) = seed.extent();
            assert!(height <= 7 && width <= 53, "{}", seed.name);
            let mut grid = Grid::empty(7, 53);
            grid.stamp(seed, (0, 0));
            assert_eq!(grid.live_count(), seed.cells.len(), "{}", seed.name);
        }
    }
}
