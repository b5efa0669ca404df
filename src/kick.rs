//! Wall kick data
//!
//! When a rotation collides, the pair is shifted sideways and retried.
//! The first entry is the unshifted attempt.

/// Horizontal offsets tried in order for every rotation
pub const KICK_OFFSETS: [i32; 5] = [0, -1, 1, -2, 2];

/// Get the horizontal offsets to try for a rotation attempt
pub fn get_wall_kicks() -> &'static [i32; 5] {
    &KICK_OFFSETS
}
