//! PUYORS - a falling-pair chain puzzle engine
//!
//! Pairs of colored puyos drop onto a grid; four or more of one color
//! touching erase, and whatever falls into the gaps may erase again.
//! [`Game`] sequences the lifecycle and commands, [`chain`] does the
//! cascade. Rendering, input and audio belong to the host.

pub mod chain;
pub mod color;
pub mod config;
pub mod game;
pub mod generator;
pub mod grid;
pub mod kick;
pub mod logging;
pub mod piece;
pub mod score;

pub use chain::{ChainResult, ChainStep, ErasedPuyo, Group, apply_gravity, resolve};
pub use color::PuyoColor;
pub use config::{ConfigError, GameConfig, GridConfig};
pub use game::{Action, Game, GameState, Transition};
pub use generator::PairGenerator;
pub use grid::{Cell, Grid};
pub use piece::{FallingPiece, Rotation};
