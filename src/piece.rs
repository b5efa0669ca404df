//! Falling pair geometry

use crate::color::PuyoColor;

/// Rotation of the satellite around the main puyo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    /// Satellite above the main puyo (spawn state)
    #[default]
    Up,
    /// Satellite to the right
    Right,
    /// Satellite below
    Down,
    /// Satellite to the left
    Left,
}

impl Rotation {
    pub fn all() -> [Rotation; 4] {
        [Rotation::Up, Rotation::Right, Rotation::Down, Rotation::Left]
    }

    /// Rotate clockwise: Up → Right → Down → Left → Up
    pub fn cw(&self) -> Rotation {
        match self {
            Rotation::Up => Rotation::Right,
            Rotation::Right => Rotation::Down,
            Rotation::Down => Rotation::Left,
            Rotation::Left => Rotation::Up,
        }
    }

    /// Rotate counter-clockwise: Up → Left → Down → Right → Up
    pub fn ccw(&self) -> Rotation {
        match self {
            Rotation::Up => Rotation::Left,
            Rotation::Left => Rotation::Down,
            Rotation::Down => Rotation::Right,
            Rotation::Right => Rotation::Up,
        }
    }

    /// Satellite offset `(dx, dy)` from the main puyo, `dy` growing downward
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Rotation::Up => (0, -1),
            Rotation::Right => (1, 0),
            Rotation::Down => (0, 1),
            Rotation::Left => (-1, 0),
        }
    }

    /// Angle in degrees, clockwise from Up
    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::Up => 0,
            Rotation::Right => 90,
            Rotation::Down => 180,
            Rotation::Left => 270,
        }
    }

    /// Rotation for an angle in degrees; anything not a multiple of 90 is rejected
    pub fn from_degrees(degrees: u16) -> Option<Rotation> {
        match degrees % 360 {
            0 => Some(Rotation::Up),
            90 => Some(Rotation::Right),
            180 => Some(Rotation::Down),
            270 => Some(Rotation::Left),
            _ => None,
        }
    }
}

/// The two-puyo unit the player controls before it locks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallingPiece {
    pub main: PuyoColor,
    pub satellite: PuyoColor,
    /// Position of the main puyo
    pub x: i32,
    pub y: i32,
    pub rotation: Rotation,
}

impl FallingPiece {
    pub fn new(main: PuyoColor, satellite: PuyoColor, x: i32, y: i32) -> Self {
        Self {
            main,
            satellite,
            x,
            y,
            rotation: Rotation::Up,
        }
    }

    /// Turn 90° clockwise. Not checked against any grid.
    pub fn rotate(&mut self) {
        self.rotation = self.rotation.cw();
    }

    /// Turn 90° counter-clockwise. Not checked against any grid.
    pub fn rotate_ccw(&mut self) {
        self.rotation = self.rotation.ccw();
    }

    pub fn main_position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn satellite_position(&self) -> (i32, i32) {
        let (dx, dy) = self.rotation.offset();
        (self.x + dx, self.y + dy)
    }

    /// Both cells with their colors, main first
    pub fn cells(&self) -> [((i32, i32), PuyoColor); 2] {
        [
            (self.main_position(), self.main),
            (self.satellite_position(), self.satellite),
        ]
    }

    /// Copy of this piece moved and turned to the given placement
    pub fn placed_at(&self, x: i32, y: i32, rotation: Rotation) -> Self {
        Self {
            x,
            y,
            rotation,
            ..*self
        }
    }
}
