//! Seeded polynomial hash feeding the data cells.
//!
//! This is not a general-purpose hash. Reference images and recognizer databases were built from
//! its exact 32-bit output, so every step uses wrapping `i32` arithmetic over UTF-16 code units.

/// Rolling base-31 hash of `lesson_id` seeded with `seed`, followed by a shift-mix step.
///
/// `hash = seed; for each unit: hash = hash * 31 + unit; hash = (hash >> 3) + hash * 17`
pub fn lesson_hash(lesson_id: &str, seed: i32) -> i32 {
    let mut hash = seed;
    for unit in lesson_id.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    // `>>` on i32 is arithmetic.
    (hash >> 3).wrapping_add(hash.wrapping_mul(17))
}

/// The per-band hashes for one lesson id (seeds 0, 1 and 2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LessonHashes(pub [i32; 3]);

impl LessonHashes {
    /// Compute all band hashes for `lesson_id`.
    pub fn new(lesson_id: &str) -> Self {
        Self([
            lesson_hash(lesson_id, 0),
            lesson_hash(lesson_id, 1),
            lesson_hash(lesson_id, 2),
        ])
    }

    /// Hash driving data cells in row `y`.
    pub fn for_row(&self, y: usize, grid_dim: usize) -> i32 {
        if y < grid_dim / 3 {
            self.0[0]
        } else if y < 2 * grid_dim / 3 {
            self.0[1]
        } else {
            self.0[2]
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/hash.rs"]
mod tests;
