// step.rs - Per-pattern transition functions
//
// Every function reads the current grid and returns a fresh one; the input
// is never mutated. None of them can fail.

use rand::Rng;

use crate::grid::Grid;
use crate::pattern::{Emitter, Pattern, PatternState};

pub const RIPPLE_SPAWN_CHANCE: f64 = 0.05;
pub const RIPPLE_GROWTH: f64 = 0.5;
pub const RIPPLE_THICKNESS: f64 = 1.0;
pub const RIPPLE_MIN_RADIUS: f64 = 5.0;
pub const RIPPLE_MAX_RADIUS: f64 = 20.0;

pub const RAIN_SPAWN_CHANCE: f64 = 0.05;
pub const RAIN_VANISH_CHANCE: f64 = 0.3;

pub const NOISE_LIVE_CHANCE: f64 = 0.2;

pub const WAVE_THRESHOLD: f64 = 0.3;
pub const SPIRAL_THRESHOLD: f64 = 0.5;

/// Rule 30 lookup, indexed by `left * 4 + center * 2 + right`.
pub const RULE_30: [u8; 8] = [0, 1, 1, 1, 1, 0, 0, 0];

/// Result of one transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub grid: Grid,
    /// Whether any cell differs from the input grid.
    pub changed: bool,
    /// State to carry into the next step; `None` keeps the current one.
    pub state: Option<PatternState>,
}

impl Step {
    fn animated(grid: Grid, state: Option<PatternState>) -> Self {
        Self { grid, changed: true, state }
    }

    fn unchanged(grid: &Grid) -> Self {
        Self { grid: grid.clone(), changed: false, state: None }
    }
}

/// Run one step of `pattern` over `grid`.
///
/// A `state` variant belonging to another pattern is read as empty.
pub fn step<R: Rng + ?Sized>(pattern: Pattern, grid: &Grid, state: &PatternState, rng: &mut R) -> Step {
    if grid.rows() == 0 || grid.cols() == 0 {
        return Step::unchanged(grid);
    }

    match pattern {
        Pattern::GameOfLife => game_of_life(grid),
        Pattern::Ripple => ripple(grid, state, rng),
        Pattern::Wave => wave(grid, state),
        Pattern::Rain => rain(grid, rng),
        Pattern::Spiral => spiral(grid, state),
        Pattern::Noise => noise(grid, rng),
        Pattern::Rule30 => rule_30(grid),
        Pattern::Image => Step::unchanged(grid),
    }
}

/// Live cells among the eight neighbours. The grid does not wrap.
pub fn live_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    let mut count = 0;
    for dr in -1isize..=1 {
        for dc in -1isize..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
                continue;
            };
            if grid.is_live(r, c) {
                count += 1;
            }
        }
    }
    count
}

pub fn game_of_life(grid: &Grid) -> Step {
    let mut next = Grid::empty(grid.rows(), grid.cols());
    let mut changed = false;

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let alive = grid.is_live(row, col);
            let next_state = match (alive, live_neighbors(grid, row, col)) {
                (true, 2) | (true, 3) => true,   // Survival
                (false, 3)            => true,   // Birth
                _                     => false,  // Death or stays dead
            };
            changed |= next_state != alive;
            next.set(row, col, u8::from(next_state));
        }
    }

    Step { grid: next, changed, state: None }
}

pub fn ripple<R: Rng + ?Sized>(grid: &Grid, state: &PatternState, rng: &mut R) -> Step {
    let (rows, cols) = grid.dimensions();
    let mut emitters = match state {
        PatternState::Ripple { emitters } => emitters.clone(),
        _ => Vec::new(),
    };

    if rng.gen_bool(RIPPLE_SPAWN_CHANCE) {
        emitters.push(Emitter {
            center_row: rng.gen_range(0..rows),
            center_col: rng.gen_range(0..cols),
            radius: 0.0,
            max_radius: rng.gen_range(RIPPLE_MIN_RADIUS..RIPPLE_MAX_RADIUS),
        });
    }

    for emitter in &mut emitters {
        emitter.radius += RIPPLE_GROWTH;
    }
    emitters.retain(|e| e.radius <= e.max_radius);

    let mut next = Grid::empty(rows, cols);
    for row in 0..rows {
        for col in 0..cols {
            let on_ring = emitters.iter().any(|e| {
                let dy = row as f64 - e.center_row as f64;
                let dx = col as f64 - e.center_col as f64;
                (dx.hypot(dy) - e.radius).abs() <= RIPPLE_THICKNESS
            });
            if on_ring {
                next.set(row, col, 1);
            }
        }
    }

    Step::animated(next, Some(PatternState::Ripple { emitters }))
}

pub fn wave(grid: &Grid, state: &PatternState) -> Step {
    let time = match state {
        PatternState::Wave { time } => *time,
        _ => 0,
    };
    let t = time as f64;

    let mut next = Grid::empty(grid.rows(), grid.cols());
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let horizontal = (col as f64 * 0.2 + t * 0.1).sin();
            let vertical = (row as f64 * 0.3 + t * 0.15).sin();
            if (horizontal + vertical) / 2.0 > WAVE_THRESHOLD {
                next.set(row, col, 1);
            }
        }
    }

    Step::animated(next, Some(PatternState::Wave { time: time + 1 }))
}

/// Drops appear on the top row, fall one row per step and may vanish at the
/// bottom. The grid itself is the only state.
pub fn rain<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Step {
    let (rows, cols) = grid.dimensions();
    let mut next = grid.clone();
    let cells = next.rows_mut();

    for cell in &mut cells[0] {
        if rng.gen_bool(RAIN_SPAWN_CHANCE) {
            *cell = 1;
        }
    }

    // bottom-up so a drop moves at most one row per step
    for row in (1..rows).rev() {
        for col in 0..cols {
            if cells[row - 1][col] > 0 {
                cells[row][col] = 1;
                cells[row - 1][col] = 0;
            }
        }
    }

    for cell in &mut cells[rows - 1] {
        if *cell > 0 && rng.gen_bool(RAIN_VANISH_CHANCE) {
            *cell = 0;
        }
    }

    Step::animated(next, None)
}

pub fn spiral(grid: &Grid, state: &PatternState) -> Step {
    let time = match state {
        PatternState::Spiral { time } => *time,
        _ => 0,
    };
    let t = time as f64;
    let center_row = grid.rows() as f64 / 2.0;
    let center_col = grid.cols() as f64 / 2.0;

    let mut next = Grid::empty(grid.rows(), grid.cols());
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let dy = row as f64 - center_row;
            let dx = col as f64 - center_col;
            let angle = dy.atan2(dx);
            let distance = dx.hypot(dy);
            if (angle * 3.0 + distance * 0.5 - t * 0.2).sin() > SPIRAL_THRESHOLD {
                next.set(row, col, 1);
            }
        }
    }

    Step::animated(next, Some(PatternState::Spiral { time: time + 1 }))
}

pub fn noise<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Step {
    Step::animated(Grid::random(grid.rows(), grid.cols(), NOISE_LIVE_CHANCE, rng), None)
}

/// Elementary Rule 30 on the middle row; every other row scrolls one column
/// to the right. The outermost columns of the middle row are left as they are.
pub fn rule_30(grid: &Grid) -> Step {
    let (rows, cols) = grid.dimensions();
    let middle = rows / 2;
    let mut next = grid.clone();
    let cells = next.rows_mut();

    for (row, cells_row) in cells.iter_mut().enumerate() {
        if row == middle {
            continue;
        }
        cells_row.rotate_right(1);
        cells_row[0] = 0;
    }

    if let Some(current) = grid.row(middle) {
        for col in 1..cols.saturating_sub(1) {
            let left = usize::from(current[col - 1] > 0);
            let center = usize::from(current[col] > 0);
            let right = usize::from(current[col + 1] > 0);
            cells[middle][col] = RULE_30[left * 4 + center * 2 + right];
        }
    }

    Step::animated(next, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::BLINKER;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0xC0FFEE)
    }

    fn blinker_grid() -> Grid {
        let mut grid = Grid::empty(7, 53);
        grid.stamp(&BLINKER, (3, 25));
        grid
    }

    #[test]
    fn neighbors_do_not_wrap() {
        let mut grid = Grid::empty(3, 3);
        grid.set(0, 2, 1);
        grid.set(2, 0, 1);
        grid.set(2, 2, 1);
        assert_eq!(live_neighbors(&grid, 0, 0), 0);
        assert_eq!(live_neighbors(&grid, 1, 1), 3);
        assert_eq!(live_neighbors(&grid, 2, 1), 2);
    }

    #[test]
    fn blinker_oscillates() {
        let start = blinker_grid();
        let once = game_of_life(&start);
        assert!(once.changed);
        assert!(once.grid.is_live(2, 26));
        assert!(once.grid.is_live(3, 26));
        assert!(once.grid.is_live(4, 26));
        assert_eq!(once.grid.live_count(), 3);

        let twice = game_of_life(&once.grid);
        assert!(twice.changed);
        assert_eq!(twice.grid, start);
    }

    #[test]
    fn block_is_stable() {
        let mut grid = Grid::empty(5, 5);
        for (r, c) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            grid.set(r, c, 1);
        }
        let first = game_of_life(&grid);
        assert!(!first.changed);
        let second = game_of_life(&first.grid);
        assert!(!second.changed);
        assert_eq!(second.grid, grid);
    }

    #[test]
    fn step_does_not_touch_input() {
        let grid = blinker_grid();
        let before = grid.clone();
        let mut rng = rng();
        for pattern in Pattern::ALL {
            let _ = step(pattern, &grid, &PatternState::Empty, &mut rng);
            assert_eq!(grid, before, "{pattern} mutated its input");
        }
    }

    #[test]
    fn image_is_a_no_op() {
        let grid = blinker_grid();
        let result = step(Pattern::Image, &grid, &PatternState::Empty, &mut rng());
        assert!(!result.changed);
        assert_eq!(result.grid, grid);
        assert!(result.state.is_none());
    }

    #[test]
    fn empty_grid_is_returned_unchanged() {
        let grid = Grid::empty(0, 0);
        for pattern in Pattern::ALL {
            let result = step(pattern, &grid, &PatternState::Empty, &mut rng());
            assert!(!result.changed);
            assert_eq!(result.grid.dimensions(), (0, 0));
        }
    }

    #[test]
    fn rule_30_first_generation() {
        let mut grid = Grid::empty(7, 53);
        grid.set(3, 26, 1);
        let next = rule_30(&grid);
        assert!(next.changed);
        let middle = next.grid.row(3).unwrap();
        assert_eq!(&middle[24..29], &[0, 1, 1, 1, 0]);
        assert_eq!(next.grid.live_count(), 3);
    }

    #[test]
    fn rule_30_scrolls_other_rows_right() {
        let mut grid = Grid::empty(3, 4);
        grid.set(0, 0, 1);
        grid.set(0, 3, 1);
        grid.set(2, 2, 1);
        let next = rule_30(&grid).grid;
        assert_eq!(next.row(0).unwrap(), &[0, 1, 0, 0]);
        assert_eq!(next.row(2).unwrap(), &[0, 0, 0, 1]);
    }

    #[test]
    fn rule_30_keeps_edge_columns() {
        let mut grid = Grid::empty(3, 4);
        grid.set(1, 0, 1);
        grid.set(1, 3, 1);
        let next = rule_30(&grid).grid;
        // edges untouched, (1,1) sees 1,0,0 -> 1, (1,2) sees 0,0,1 -> 1
        assert_eq!(next.row(1).unwrap(), &[1, 1, 1, 1]);
    }

    #[test]
    fn wave_and_spiral_advance_time() {
        let grid = Grid::empty(7, 53);
        let wave_step = wave(&grid, &PatternState::Wave { time: 4 });
        assert_eq!(wave_step.state, Some(PatternState::Wave { time: 5 }));

        let spiral_step = spiral(&grid, &PatternState::Empty);
        assert_eq!(spiral_step.state, Some(PatternState::Spiral { time: 1 }));
        assert!(spiral_step.changed);
    }

    #[test]
    fn wave_matches_formula() {
        let grid = Grid::empty(7, 53);
        let result = wave(&grid, &PatternState::Wave { time: 10 }).grid;
        let t = 10.0_f64;
        for row in 0..7 {
            for col in 0..53 {
                let value = ((col as f64 * 0.2 + t * 0.1).sin() + (row as f64 * 0.3 + t * 0.15).sin()) / 2.0;
                assert_eq!(result.is_live(row, col), value > 0.3, "({row}, {col})");
            }
        }
    }

    #[test]
    fn spiral_matches_formula() {
        let grid = Grid::empty(7, 53);
        let result = spiral(&grid, &PatternState::Spiral { time: 5 }).grid;
        let t = 5.0_f64;
        for row in 0..7 {
            for col in 0..53 {
                let dy = row as f64 - 3.5;
                let dx = col as f64 - 26.5;
                let value = (dy.atan2(dx) * 3.0 + dx.hypot(dy) * 0.5 - t * 0.2).sin();
                assert_eq!(result.is_live(row, col), value > 0.5, "({row}, {col})");
            }
        }
        assert!(result.live_count() > 0);
    }

    #[test]
    fn ripples_spawn_at_the_expected_rate() {
        let grid = Grid::empty(7, 53);
        let mut rng = rng();
        let mut state = PatternState::Empty;
        let mut spawned = 0;

        for _ in 0..2000 {
            let result = ripple(&grid, &state, &mut rng);
            let Some(PatternState::Ripple { emitters }) = &result.state else {
                panic!("ripple state expected");
            };
            // a fresh emitter has grown exactly once
            for emitter in emitters.iter().filter(|e| (e.radius - RIPPLE_GROWTH).abs() < 1e-9) {
                spawned += 1;
                assert!((RIPPLE_MIN_RADIUS..RIPPLE_MAX_RADIUS).contains(&emitter.max_radius));
                assert!(emitter.center_row < 7 && emitter.center_col < 53);
            }
            assert!(emitters.iter().all(|e| e.radius <= e.max_radius));
            state = result.state.unwrap();
        }

        // 5% of 2000 steps is 100
        assert!((60..=140).contains(&spawned), "spawned {spawned}");
    }

    #[test]
    fn noise_density_is_close_to_one_fifth() {
        let grid = Grid::empty(100, 100);
        let result = noise(&grid, &mut rng());
        assert!(result.changed);
        let density = result.grid.live_count() as f64 / 10_000.0;
        assert!((0.17..0.23).contains(&density), "density {density}");
    }

    #[test]
    fn rain_spawns_at_the_expected_rate() {
        // two rows: every spawned drop lands on the empty bottom row before
        // the vanish roll, so count the survivors and undo the 30% loss
        let grid = Grid::empty(2, 10_000);
        let result = rain(&grid, &mut rng());
        let landed = result.grid.live_count() as f64 / 0.7;
        let rate = landed / 10_000.0;
        assert!((0.035..0.065).contains(&rate), "rate {rate}");
        assert_eq!(result.grid.row(0).unwrap().iter().filter(|&&v| v > 0).count(), 0);
    }

    #[test]
    fn rain_drops_fall_one_row() {
        let mut grid = Grid::empty(5, 4);
        grid.set(1, 2, 1);
        let mut rng = rng();
        let next = rain(&grid, &mut rng).grid;
        assert!(next.is_live(2, 2));
        assert!(!next.is_live(3, 2));
        // anything spawned on the top row has already moved down
        assert_eq!(next.row(0).unwrap(), &[0, 0, 0, 0]);
    }

    #[test]
    fn rain_drains_at_the_bottom() {
        let mut grid = Grid::empty(2, 200);
        for col in 0..200 {
            grid.set(1, col, 1);
        }
        let next = rain(&grid, &mut rng()).grid;
        let remaining = next.row(1).unwrap().iter().filter(|&&v| v > 0).count();
        assert!(remaining < 200);
        assert!(remaining > 100);
    }

    #[test]
    fn ripples_grow_and_expire() {
        let grid = Grid::empty(7, 53);
        let state = PatternState::Ripple {
            emitters: vec![
                Emitter { center_row: 3, center_col: 10, radius: 2.0, max_radius: 6.0 },
                Emitter { center_row: 3, center_col: 40, radius: 5.8, max_radius: 6.0 },
            ],
        };
        let result = ripple(&grid, &state, &mut rng());
        let Some(PatternState::Ripple { emitters }) = result.state else {
            panic!("ripple state expected");
        };
        let survivor = emitters.iter().find(|e| e.center_col == 10).unwrap();
        assert!((survivor.radius - 2.5).abs() < f64::EPSILON);
        assert!(emitters.iter().all(|e| e.radius <= e.max_radius));
        assert!(!emitters.iter().any(|e| (e.radius - 6.3).abs() < 1e-9));
        // ring of radius 2.5 around (3, 10)
        assert!(result.grid.is_live(3, 12));
        assert!(!result.grid.is_live(3, 10));
    }

    #[test]
    fn non_life_patterns_stay_binary() {
        let mut rng = rng();
        let grid = Grid::random(7, 53, 0.5, &mut rng);
        for pattern in Pattern::ALL.into_iter().filter(|p| *p != Pattern::GameOfLife) {
            let mut current = grid.clone();
            let mut state = PatternState::Empty;
            for _ in 0..20 {
                let result = step(pattern, &current, &state, &mut rng);
                assert_eq!(result.grid.dimensions(), (7, 53));
                assert!(result.grid.iter_rows().flatten().all(|&v| v <= 1));
                current = result.grid;
                state = result.state.unwrap_or(state);
            }
        }
    }
}
