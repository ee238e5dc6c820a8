// data.rs - Stand-in contribution data for the calendar
//
// A real deployment fills this from the contributions API; the view only
// needs a rows × cols matrix of counts.

use rand::Rng;

pub const LEVELS: usize = 5;

pub struct ContributionGrid {
    counts: Vec<Vec<u32>>,
}

impl ContributionGrid {
    /// Roughly three days in five have some activity.
    pub fn synthetic<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let counts = (0..rows)
            .map(|_| {
                (0..cols)
                    .map(|_| if rng.gen_bool(0.6) { rng.gen_range(1..=14) } else { 0 })
                    .collect()
            })
            .collect();
        Self { counts }
    }

    pub fn count(&self, row: usize, col: usize) -> u32 {
        self.counts.get(row).and_then(|r| r.get(col)).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().map(|&c| u64::from(c)).sum()
    }

    pub fn active_days(&self) -> usize {
        self.counts.iter().flatten().filter(|&&c| c > 0).count()
    }
}

/// Intensity bucket (0..LEVELS) for a day's count.
pub const fn level(count: u32) -> usize {
    match count {
        0 => 0,
        1..=3 => 1,
        4..=6 => 2,
        7..=9 => 3,
        _ => 4,
    }
}
