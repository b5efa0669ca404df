//! Chain resolution: group search, erasure, gravity and cascade scoring

use crate::color::PuyoColor;
use crate::grid::Grid;
use crate::score;
use std::collections::BTreeSet;

/// Minimum group size that erases
pub const ERASE_THRESHOLD: usize = 4;

/// 4-neighbourhood: up, down, left, right
const NEIGHBOURS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// A maximal set of 4-connected same-colored puyos
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub color: PuyoColor,
    pub cells: Vec<(i32, i32)>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_erasable(&self) -> bool {
        self.cells.len() >= ERASE_THRESHOLD
    }
}

/// A puyo removed during a cascade step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErasedPuyo {
    pub x: i32,
    pub y: i32,
    pub color: PuyoColor,
}

/// Record of one erase-then-gravity step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainStep {
    /// 1-based position in the cascade
    pub step_number: usize,
    pub erased: Vec<ErasedPuyo>,
    pub step_score: u64,
    pub group_count: usize,
    /// Distinct colors among the erased puyos
    pub color_count: usize,
}

/// Outcome of resolving one lock
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChainResult {
    /// Number of steps that erased at least one group
    pub chain_count: usize,
    pub total_erased: usize,
    pub score: u64,
    pub steps: Vec<ChainStep>,
}

impl ChainResult {
    /// True if nothing was erased
    pub fn is_empty(&self) -> bool {
        self.chain_count == 0
    }
}

/// Find every group on the grid, whatever its size
///
/// Uses an explicit stack and a visited table sized to the grid, so the
/// search depth never depends on the call stack.
pub fn find_groups(grid: &Grid) -> Vec<Group> {
    let (width, height) = (grid.width() as i32, grid.height() as i32);
    let mut visited = vec![false; grid.width() * grid.height()];
    let slot = |x: i32, y: i32| (y * width + x) as usize;
    let mut groups = Vec::new();

    for x in 0..width {
        for y in 0..height {
            if visited[slot(x, y)] {
                continue;
            }
            let Some(color) = grid.get(x, y).color() else {
                continue;
            };

            let mut cells = Vec::new();
            let mut stack = vec![(x, y)];
            visited[slot(x, y)] = true;

            while let Some((cx, cy)) = stack.pop() {
                cells.push((cx, cy));
                for (dx, dy) in NEIGHBOURS {
                    let (nx, ny) = (cx + dx, cy + dy);
                    if !grid.in_bounds(nx, ny) || visited[slot(nx, ny)] {
                        continue;
                    }
                    if grid.get(nx, ny).color() == Some(color) {
                        visited[slot(nx, ny)] = true;
                        stack.push((nx, ny));
                    }
                }
            }

            groups.push(Group { color, cells });
        }
    }

    groups
}

/// Find the groups large enough to erase
pub fn find_erasable_groups(grid: &Grid) -> Vec<Group> {
    find_groups(grid)
        .into_iter()
        .filter(Group::is_erasable)
        .collect()
}

/// Compact every column toward the bottom, keeping top-to-bottom order
///
/// Returns whether any puyo moved.
pub fn apply_gravity(grid: &mut Grid) -> bool {
    let height = grid.height() as i32;
    let mut moved = false;

    for x in 0..grid.width() as i32 {
        let mut write_y = height - 1;
        for read_y in (0..height).rev() {
            let Some(color) = grid.get(x, read_y).color() else {
                continue;
            };
            if write_y != read_y {
                grid.set(x, write_y, color);
                grid.clear(x, read_y);
                moved = true;
            }
            write_y -= 1;
        }
    }

    moved
}

/// Run the full cascade on `grid`
///
/// Each iteration erases every erasable group, applies gravity and scores
/// the step. The loop ends when no group qualifies; every iteration removes
/// at least four puyos so it always terminates.
pub fn resolve(grid: &mut Grid) -> ChainResult {
    let mut result = ChainResult::default();

    loop {
        let groups = find_erasable_groups(grid);
        if groups.is_empty() {
            break;
        }

        let step_number = result.chain_count + 1;
        let mut erased = Vec::new();
        let mut colors = BTreeSet::new();
        for group in &groups {
            colors.insert(group.color);
            for &(x, y) in &group.cells {
                grid.clear(x, y);
                erased.push(ErasedPuyo {
                    x,
                    y,
                    color: group.color,
                });
            }
        }

        apply_gravity(grid);

        let step_score = score::step_score(step_number, erased.len(), colors.len(), groups.len());
        tracing::debug!(
            step = step_number,
            erased = erased.len(),
            groups = groups.len(),
            colors = colors.len(),
            step_score,
            "chain step"
        );

        result.chain_count = step_number;
        result.total_erased += erased.len();
        result.score += step_score;
        result.steps.push(ChainStep {
            step_number,
            erased,
            step_score,
            group_count: groups.len(),
            color_count: colors.len(),
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use proptest::prelude::*;

    const RED: PuyoColor = PuyoColor::Red;
    const BLUE: PuyoColor = PuyoColor::Blue;
    const GREEN: PuyoColor = PuyoColor::Green;

    /// 6 x 16 with one hidden row; row 15 is the floor
    fn tall_grid() -> Grid {
        Grid::new(6, 16, 1)
    }

    #[test]
    fn test_empty_grid_resolves_to_nothing() {
        let mut grid = tall_grid();
        let result = resolve(&mut grid);
        assert_eq!(result, ChainResult::default());
        assert_eq!(result.chain_count, 0);
        assert_eq!(result.total_erased, 0);
        assert_eq!(result.score, 0);
        assert!(result.steps.is_empty());
    }

    #[test]
    fn test_four_in_a_row_erases() {
        let mut grid = tall_grid();
        for x in 1..=4 {
            grid.set(x, 15, RED);
        }

        let result = resolve(&mut grid);
        assert_eq!(result.chain_count, 1);
        assert_eq!(result.total_erased, 4);
        assert_eq!(result.score, 40);
        assert!(grid.is_empty());

        let step = &result.steps[0];
        assert_eq!(step.step_number, 1);
        assert_eq!(step.group_count, 1);
        assert_eq!(step.color_count, 1);
        assert!(step.erased.iter().all(|p| p.color == RED && p.y == 15));
    }

    #[test]
    fn test_three_connected_stay() {
        let mut grid = tall_grid();
        for x in 1..=3 {
            grid.set(x, 15, RED);
        }

        let result = resolve(&mut grid);
        assert_eq!(result.chain_count, 0);
        assert_eq!(result.score, 0);
        for x in 1..=3 {
            assert_eq!(grid.get(x, 15), Cell::Filled(RED));
        }
    }

    #[test]
    fn test_disconnected_same_color_do_not_merge() {
        let mut grid = tall_grid();
        grid.set(0, 15, RED);
        grid.set(2, 15, RED);
        grid.set(4, 15, RED);
        grid.set(1, 13, RED);
        grid.set(1, 14, BLUE);

        let groups = find_groups(&grid);
        let reds: Vec<_> = groups.iter().filter(|g| g.color == RED).collect();
        assert_eq!(reds.len(), 4);
        assert!(reds.iter().all(|g| g.len() == 1));

        let result = resolve(&mut grid);
        assert_eq!(result.chain_count, 0);
    }

    #[test]
    fn test_two_step_cascade() {
        let mut grid = tall_grid();
        // Blues split by a red group; they join once the reds pop
        grid.set(1, 15, BLUE);
        grid.set(1, 13, BLUE);
        grid.set(2, 15, BLUE);
        grid.set(2, 12, BLUE);

        grid.set(1, 14, RED);
        grid.set(2, 14, RED);
        grid.set(2, 13, RED);
        grid.set(3, 14, RED);

        let result = resolve(&mut grid);
        assert_eq!(result.chain_count, 2);
        assert_eq!(result.total_erased, 8);
        assert_eq!(result.score, 360);
        assert_eq!(result.steps[0].step_score, 40);
        assert_eq!(result.steps[1].step_score, 320);
        assert!(result.steps[1].erased.iter().all(|p| p.color == BLUE));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_two_groups_in_one_step() {
        let mut grid = tall_grid();
        for y in 12..=15 {
            grid.set(0, y, RED);
            grid.set(5, y, GREEN);
        }

        let result = resolve(&mut grid);
        assert_eq!(result.chain_count, 1);
        let step = &result.steps[0];
        assert_eq!(step.group_count, 2);
        assert_eq!(step.color_count, 2);
        assert_eq!(step.erased.len(), 8);
        // First step ignores bonuses
        assert_eq!(result.score, 80);
    }

    #[test]
    fn test_large_group_single_step() {
        let mut grid = tall_grid();
        for x in 0..6 {
            for y in 13..16 {
                grid.set(x, y, GREEN);
            }
        }
        let result = resolve(&mut grid);
        assert_eq!(result.chain_count, 1);
        assert_eq!(result.total_erased, 18);
        assert_eq!(result.steps[0].group_count, 1);
    }

    #[test]
    fn test_gravity_single_column() {
        let mut grid = tall_grid();
        grid.set(2, 15, RED);
        grid.set(2, 10, BLUE);
        grid.set(2, 8, GREEN);

        assert!(apply_gravity(&mut grid));
        assert_eq!(grid.get(2, 15), Cell::Filled(RED));
        assert_eq!(grid.get(2, 14), Cell::Filled(BLUE));
        assert_eq!(grid.get(2, 13), Cell::Filled(GREEN));
        assert!(grid.get(2, 10).is_empty());
        assert!(grid.get(2, 8).is_empty());
    }

    #[test]
    fn test_gravity_columns_independent() {
        let mut grid = tall_grid();
        grid.set(1, 15, RED);
        grid.set(1, 12, BLUE);
        grid.set(2, 15, GREEN);
        grid.set(2, 10, PuyoColor::Yellow);
        grid.set(3, 15, RED);

        apply_gravity(&mut grid);
        assert_eq!(grid.get(1, 14), Cell::Filled(BLUE));
        assert_eq!(grid.get(2, 14), Cell::Filled(PuyoColor::Yellow));
        assert!(grid.get(3, 14).is_empty());
    }

    #[test]
    fn test_gravity_on_settled_grid_is_noop() {
        let mut grid = tall_grid();
        grid.set(0, 15, RED);
        grid.set(0, 14, BLUE);
        let before = grid.clone();
        assert!(!apply_gravity(&mut grid));
        assert_eq!(grid, before);
    }

    const W: usize = 6;
    const H: usize = 8;

    fn grid_from(cells: &[u8]) -> Grid {
        let palette = PuyoColor::palette(4);
        let mut grid = Grid::new(W, H, 1);
        for (i, &c) in cells.iter().enumerate() {
            if let Some(&color) = palette.get(c as usize) {
                grid.set((i % W) as i32, (i / W) as i32, color);
            }
        }
        grid
    }

    fn column(grid: &Grid, x: i32) -> Vec<PuyoColor> {
        (0..grid.height() as i32)
            .filter_map(|y| grid.get(x, y).color())
            .collect()
    }

    fn has_gaps(grid: &Grid) -> bool {
        (0..grid.width() as i32).any(|x| {
            (0..grid.height() as i32 - 1)
                .any(|y| grid.get(x, y).is_filled() && grid.get(x, y + 1).is_empty())
        })
    }

    proptest! {
        #[test]
        fn prop_gravity_compacts_and_keeps_order(cells in proptest::collection::vec(0u8..7, W * H)) {
            let mut grid = grid_from(&cells);
            let before: Vec<_> = (0..W as i32).map(|x| column(&grid, x)).collect();
            apply_gravity(&mut grid);
            let after: Vec<_> = (0..W as i32).map(|x| column(&grid, x)).collect();
            prop_assert_eq!(before, after);
            prop_assert!(!has_gaps(&grid));
        }

        #[test]
        fn prop_first_step_erases_exactly_large_groups(cells in proptest::collection::vec(0u8..6, W * H)) {
            let mut grid = grid_from(&cells);
            let expected: BTreeSet<(i32, i32)> = find_groups(&grid)
                .into_iter()
                .filter(|g| g.len() >= ERASE_THRESHOLD)
                .flat_map(|g| g.cells)
                .collect();

            let result = resolve(&mut grid);
            let erased: BTreeSet<(i32, i32)> = result
                .steps
                .first()
                .map(|s| s.erased.iter().map(|p| (p.x, p.y)).collect())
                .unwrap_or_default();
            prop_assert_eq!(erased, expected);
        }

        #[test]
        fn prop_resolve_leaves_stable_grid(cells in proptest::collection::vec(0u8..6, W * H)) {
            let mut grid = grid_from(&cells);
            let filled = grid.filled_count();
            let result = resolve(&mut grid);

            prop_assert!(find_erasable_groups(&grid).is_empty());
            prop_assert_eq!(grid.filled_count(), filled - result.total_erased);
            prop_assert_eq!(result.steps.len(), result.chain_count);
            prop_assert_eq!(result.score, result.steps.iter().map(|s| s.step_score).sum::<u64>());
            if result.chain_count > 0 {
                prop_assert!(!has_gaps(&grid));
            }
        }
    }
}
