//! Puyo color palette

const PALETTE: [PuyoColor; 5] = [
    PuyoColor::Red,
    PuyoColor::Green,
    PuyoColor::Blue,
    PuyoColor::Yellow,
    PuyoColor::Purple,
];

/// The five puyo colors. Games draw from the first `color_count` of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PuyoColor {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
}

impl PuyoColor {
    /// Largest palette a game may use
    pub const MAX_COLORS: usize = 5;

    /// Get all colors in palette order
    pub fn all() -> [PuyoColor; 5] {
        PALETTE
    }

    /// The first `count` colors of the palette, clamped to the full set
    pub fn palette(count: usize) -> &'static [PuyoColor] {
        &PALETTE[..count.min(PALETTE.len())]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PuyoColor::Red => "red",
            PuyoColor::Green => "green",
            PuyoColor::Blue => "blue",
            PuyoColor::Yellow => "yellow",
            PuyoColor::Purple => "purple",
        }
    }
}

impl std::fmt::Display for PuyoColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
