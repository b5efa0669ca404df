//! Core game state and logic

use crate::chain::{self, ChainResult};
use crate::config::{ConfigError, GameConfig};
use crate::generator::PairGenerator;
use crate::grid::{Cell, Grid};
use crate::kick::get_wall_kicks;
use crate::piece::{FallingPiece, Rotation};

/// Game lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Ready,
    Playing,
    Paused,
    GameOver,
}

/// Events that move the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Start,
    Pause,
    Resume,
    Restart,
    /// A freshly spawned pair overlaps the visible stack
    TopOut,
}

impl GameState {
    /// Transition table; `None` means the event is ignored in this state
    pub fn next(self, transition: Transition) -> Option<GameState> {
        use GameState::*;
        use Transition::*;

        match (self, transition) {
            (Ready, Start) => Some(Playing),
            (Playing, Pause) => Some(Paused),
            (Paused, Resume) => Some(Playing),
            // Any state may restart, Ready included
            (_, Restart) => Some(Playing),
            (Playing, TopOut) => Some(GameOver),
            _ => None,
        }
    }
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    /// Toggles between Playing and Paused
    Pause,
    Restart,
}

/// The game controller
///
/// Owns the grid, the active and queued pairs and the running score for one
/// game. Nothing outside mutates them.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    grid: Grid,
    /// Pair under player control
    current_piece: Option<FallingPiece>,
    /// Pair that spawns after the next lock
    next_piece: Option<FallingPiece>,
    generator: PairGenerator,
    score: u64,
    state: GameState,
    /// Cascade produced by the most recent lock
    last_chain: Option<ChainResult>,
    /// Whether the most recent lock emptied the grid
    last_all_clear: bool,
}

impl Game {
    /// Create a game in the Ready state. Uses `config.seed` when set.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let generator = match config.seed {
            Some(seed) => PairGenerator::with_seed(seed, config.color_count),
            None => PairGenerator::new(config.color_count),
        };
        Ok(Self::from_parts(config, generator))
    }

    /// Create a game with an explicit seed, overriding `config.seed`
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(GameConfig {
            seed: Some(seed),
            ..config
        })
    }

    fn from_parts(config: GameConfig, generator: PairGenerator) -> Self {
        let grid = Grid::new(
            config.grid.width,
            config.grid.height,
            config.grid.hidden_rows,
        );
        Self {
            config,
            grid,
            current_piece: None,
            next_piece: None,
            generator,
            score: 0,
            state: GameState::Ready,
            last_chain: None,
            last_all_clear: false,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Per-cell lookup; out of range reads as empty
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        self.grid.get(x, y)
    }

    pub fn active_piece(&self) -> Option<&FallingPiece> {
        self.current_piece.as_ref()
    }

    pub fn next_piece(&self) -> Option<&FallingPiece> {
        self.next_piece.as_ref()
    }

    pub fn last_chain_result(&self) -> Option<&ChainResult> {
        self.last_chain.as_ref()
    }

    pub fn last_all_clear(&self) -> bool {
        self.last_all_clear
    }

    fn apply(&mut self, transition: Transition) -> bool {
        match self.state.next(transition) {
            Some(next) => {
                tracing::info!(from = ?self.state, to = ?next, ?transition, "state change");
                self.state = next;
                true
            }
            None => false,
        }
    }

    /// Ready → Playing, dealing the first active and queued pairs
    pub fn start(&mut self) -> bool {
        if !self.apply(Transition::Start) {
            return false;
        }
        self.deal();
        true
    }

    fn deal(&mut self) {
        self.current_piece = Some(self.new_piece());
        self.next_piece = Some(self.new_piece());
    }

    pub fn pause(&mut self) -> bool {
        self.apply(Transition::Pause)
    }

    pub fn resume(&mut self) -> bool {
        self.apply(Transition::Resume)
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            GameState::Playing => self.pause(),
            GameState::Paused => self.resume(),
            _ => false,
        }
    }

    /// Throw the whole game away and start a fresh one with the same config.
    /// The pair generator carries on so seeded sessions stay reproducible.
    pub fn restart(&mut self) {
        let Some(next) = self.state.next(Transition::Restart) else {
            return;
        };
        tracing::info!(from = ?self.state, score = self.score, "restart");
        let generator = self.generator.clone();
        *self = Self::from_parts(self.config.clone(), generator);
        self.state = next;
        self.deal();
    }

    /// Process an action, returning whether it had an effect
    pub fn process_action(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::SoftDrop => self.drop(),
            Action::HardDrop => {
                let playing = self.is_playing();
                self.hard_drop();
                playing
            }
            Action::RotateCw => self.rotate(),
            Action::RotateCcw => self.rotate_ccw(),
            Action::Pause => self.toggle_pause(),
            Action::Restart => {
                self.restart();
                true
            }
        }
    }

    fn is_playing(&self) -> bool {
        self.state == GameState::Playing && self.current_piece.is_some()
    }

    /// Where a fresh pair's main puyo appears: centre-left column, top visible row
    fn spawn_position(&self) -> (i32, i32) {
        let x = (self.grid.width() / 2).saturating_sub(1) as i32;
        (x, self.grid.hidden_rows() as i32)
    }

    fn new_piece(&mut self) -> FallingPiece {
        let (main, satellite) = self.generator.next_pair();
        let (x, y) = self.spawn_position();
        FallingPiece::new(main, satellite, x, y)
    }

    fn fits(&self, piece: &FallingPiece) -> bool {
        piece
            .cells()
            .iter()
            .all(|&((x, y), _)| self.grid.is_free(x, y))
    }

    /// Whether the active pair could sit at `(x, y)` with `rotation`:
    /// both cells inside the grid and unoccupied
    pub fn is_valid_position(&self, x: i32, y: i32, rotation: Rotation) -> bool {
        self.current_piece
            .is_some_and(|piece| self.fits(&piece.placed_at(x, y, rotation)))
    }

    fn try_shift(&mut self, dx: i32, dy: i32) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(piece) = self.current_piece else {
            return false;
        };
        let candidate = piece.placed_at(piece.x + dx, piece.y + dy, piece.rotation);
        if self.fits(&candidate) {
            self.current_piece = Some(candidate);
            true
        } else {
            tracing::trace!(dx, dy, x = piece.x, y = piece.y, "shift blocked");
            false
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_shift(1, 0)
    }

    /// Soft drop by one row
    pub fn drop(&mut self) -> bool {
        self.try_shift(0, 1)
    }

    /// Drop until blocked, then lock. Returns the rows fallen.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.is_playing() {
            return 0;
        }
        let mut distance = 0;
        while self.drop() {
            distance += 1;
        }
        self.fix_current_pair();
        distance
    }

    fn try_rotate(&mut self, rotation: Rotation) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(piece) = self.current_piece else {
            return false;
        };

        for &kick in get_wall_kicks() {
            let candidate = piece.placed_at(piece.x + kick, piece.y, rotation);
            if self.fits(&candidate) {
                self.current_piece = Some(candidate);
                return true;
            }
        }

        tracing::trace!(x = piece.x, y = piece.y, to = ?rotation, "rotation blocked");
        false
    }

    /// Rotate clockwise, kicking sideways if needed
    pub fn rotate(&mut self) -> bool {
        match self.current_piece {
            Some(piece) => self.try_rotate(piece.rotation.cw()),
            None => false,
        }
    }

    /// Rotate counter-clockwise, kicking sideways if needed
    pub fn rotate_ccw(&mut self) -> bool {
        match self.current_piece {
            Some(piece) => self.try_rotate(piece.rotation.ccw()),
            None => false,
        }
    }

    /// Lock the active pair, resolve the cascade and spawn the queued pair
    pub fn fix_current_pair(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        let Some(piece) = self.current_piece.take() else {
            return;
        };

        for ((x, y), color) in piece.cells() {
            self.grid.set(x, y, color);
        }
        tracing::debug!(
            main = %piece.main,
            satellite = %piece.satellite,
            at = ?piece.main_position(),
            rotation = piece.rotation.degrees(),
            "pair locked"
        );

        chain::apply_gravity(&mut self.grid);
        let result = chain::resolve(&mut self.grid);
        self.score += result.score;

        self.last_all_clear = !result.is_empty() && self.grid.is_empty();
        if self.last_all_clear {
            self.score += self.config.all_clear_bonus;
            tracing::debug!(bonus = self.config.all_clear_bonus, "all clear");
        }
        if !result.is_empty() {
            tracing::debug!(
                chains = result.chain_count,
                erased = result.total_erased,
                gained = result.score,
                total = self.score,
                "cascade resolved"
            );
        }
        self.last_chain = Some(result);

        let (x, y) = self.spawn_position();
        let promoted = match self.next_piece.take() {
            Some(next) => next.placed_at(x, y, Rotation::Up),
            None => self.new_piece(),
        };
        self.next_piece = Some(self.new_piece());

        if self.is_spawn_blocked(&promoted) {
            self.apply(Transition::TopOut);
            tracing::info!(score = self.score, "game over");
            return;
        }
        self.current_piece = Some(promoted);
    }

    /// A spawn is blocked only by occupied cells in the visible area;
    /// anything in the hidden rows is ignored
    fn is_spawn_blocked(&self, piece: &FallingPiece) -> bool {
        piece
            .cells()
            .iter()
            .any(|&((x, y), _)| self.grid.is_visible_row(y) && self.grid.get(x, y).is_filled())
    }
}

impl Default for Game {
    fn default() -> Self {
        let config = GameConfig::default();
        let generator = PairGenerator::new(config.color_count);
        Self::from_parts(config, generator)
    }
}
