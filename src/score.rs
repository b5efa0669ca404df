//! Chain scoring tables
//!
//! A cascade step scores `erased * 10`, multiplied from the second step on
//! by the sum of the chain, color, count and group bonuses.

/// Points per erased puyo
pub const POINTS_PER_PUYO: u64 = 10;

/// Bonus for a lock whose cascade leaves the grid empty
pub const ALL_CLEAR_BONUS: u64 = 3600;

/// Chain bonus by step number (index 0 unused)
const CHAIN_BONUS: [u64; 20] = [
    0, 1, 8, 16, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 480, 512,
];

/// Color bonus by number of distinct colors erased in one step
const COLOR_BONUS: [u64; 5] = [0, 0, 3, 6, 12];

/// Count bonus by number of puyos erased in one step
const COUNT_BONUS: [u64; 12] = [0, 0, 0, 0, 0, 2, 3, 4, 5, 6, 7, 10];

/// Chain bonus for a 1-based step number; 512 past the end of the table
pub fn chain_bonus(step: usize) -> u64 {
    CHAIN_BONUS.get(step).copied().unwrap_or(512)
}

/// Color bonus; 12 for four or more colors
pub fn color_bonus(colors: usize) -> u64 {
    COLOR_BONUS.get(colors).copied().unwrap_or(12)
}

/// Count bonus; 10 for eleven or more puyos
pub fn count_bonus(erased: usize) -> u64 {
    COUNT_BONUS.get(erased).copied().unwrap_or(10)
}

/// Extra groups erased in the same step beyond the first
pub fn group_bonus(groups: usize) -> u64 {
    groups.saturating_sub(1) as u64
}

/// Score one cascade step
///
/// The first step is never multiplied. Later steps use the summed bonuses,
/// floored at 1.
pub fn step_score(step: usize, erased: usize, colors: usize, groups: usize) -> u64 {
    let base = erased as u64 * POINTS_PER_PUYO;
    if step <= 1 {
        return base;
    }
    let multiplier =
        chain_bonus(step) + color_bonus(colors) + count_bonus(erased) + group_bonus(groups);
    base * multiplier.max(1)
}
