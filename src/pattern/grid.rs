use crate::foundation::core::{BORDER_CELLS, GRID_DIM, TIMING_INDEX};
use crate::pattern::hash::LessonHashes;

/// Region a grid cell belongs to. Every cell is in exactly one region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// Outermost [`BORDER_CELLS`] rings of the grid.
    Border,
    /// Alignment rows/columns at [`TIMING_INDEX`] and its mirror.
    Timing,
    /// Hash-driven cell; `band` is 0, 1 or 2 for the top, middle and bottom third.
    Data {
        /// Horizontal third of the grid the cell lies in.
        band: u8,
    },
}

/// Classify cell `(x, y)` of a `GRID_DIM x GRID_DIM` grid.
///
/// Border wins over timing, timing wins over data.
pub fn classify(x: usize, y: usize) -> Region {
    let far = GRID_DIM - BORDER_CELLS;
    if x < BORDER_CELLS || y < BORDER_CELLS || x >= far || y >= far {
        return Region::Border;
    }

    let mirror = GRID_DIM - 1 - TIMING_INDEX;
    if x == TIMING_INDEX || x == mirror || y == TIMING_INDEX || y == mirror {
        return Region::Timing;
    }

    let band = if y < GRID_DIM / 3 {
        0
    } else if y < 2 * GRID_DIM / 3 {
        1
    } else {
        2
    };
    Region::Data { band }
}

/// Binary cell pattern for one lesson id, row-major.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PatternGrid {
    cells: [[bool; GRID_DIM]; GRID_DIM],
}

impl PatternGrid {
    /// Side length in cells.
    pub fn dim(&self) -> usize {
        GRID_DIM
    }

    /// Cell value at column `x`, row `y`. `true` renders black.
    ///
    /// Panics if either coordinate is `>= GRID_DIM`.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[y][x]
    }

    /// Cell value as `0` or `1`.
    pub fn bit(&self, x: usize, y: usize) -> u8 {
        u8::from(self.get(x, y))
    }

    /// Iterate `(x, y, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(y, row)| row.iter().enumerate().map(move |(x, &v)| (x, y, v)))
    }

    /// Number of set cells.
    pub fn count_ones(&self) -> usize {
        self.iter().filter(|&(_, _, v)| v).count()
    }

    /// Text rendering, one line per row: `#` for set cells, `.` for clear ones.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(GRID_DIM * (GRID_DIM + 1));
        for row in &self.cells {
            for &v in row {
                out.push(if v { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

impl std::fmt::Debug for PatternGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "PatternGrid {GRID_DIM}x{GRID_DIM}")?;
        f.write_str(&self.to_ascii())
    }
}

/// Generate the cell pattern for `lesson_id`.
///
/// Pure function of `lesson_id`: the title never reaches this stage, so the same id always
/// produces the same grid. Border and timing cells are a `(x + y) % 2` checkerboard. Data cells
/// take the hash of their band and set the bit when `(|hash| + 7x + 13y) % 2 == 1`, evaluated in
/// wrapping 32-bit arithmetic.
pub fn generate_pattern(lesson_id: &str) -> PatternGrid {
    let hashes = LessonHashes::new(lesson_id);
    let mut cells = [[false; GRID_DIM]; GRID_DIM];

    for (y, row) in cells.iter_mut().enumerate() {
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = match classify(x, y) {
                Region::Border | Region::Timing => (x + y) % 2 == 1,
                Region::Data { .. } => data_bit(hashes.for_row(y, GRID_DIM), x, y),
            };
        }
    }

    PatternGrid { cells }
}

fn data_bit(hash: i32, x: usize, y: usize) -> bool {
    // x, y < GRID_DIM, so the offset always fits.
    let offset = (x * 7 + y * 13) as i32;
    // A negative sum (|i32::MIN| or overflow) leaves remainder 0 or -1, both clear.
    hash.wrapping_abs().wrapping_add(offset) % 2 == 1
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/grid.rs"]
mod tests;
