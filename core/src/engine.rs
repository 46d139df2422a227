use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Every this many apples eaten a milestone event fires.
pub const SCORE_MILESTONE: CellCount = 5;

/// Valid transitions:
/// - Ongoing -> LostSelfCollision
/// - Ongoing -> LostFlagMismatch
/// - Ongoing -> WonAllApples
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinState {
    #[default]
    Ongoing,
    LostSelfCollision,
    LostFlagMismatch,
    WonAllApples,
}

impl WinState {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Ongoing)
    }

    pub const fn is_won(self) -> bool {
        matches!(self, Self::WonAllApples)
    }

    pub const fn reason(self) -> &'static str {
        use WinState::*;
        match self {
            Ongoing => "",
            LostSelfCollision => "Oh no! You ran into yourself!",
            LostFlagMismatch => {
                "Oops! Looks like you flagged the wrong tile! That tile didn't have an apple."
            }
            WonAllApples => "Congratulations! You collected all the hidden apples! Nice Job!",
        }
    }
}

/// Outcome of a requested direction change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Accepted,
    /// Another change was already accepted this tick.
    Locked,
    Reversal,
    Unchanged,
    Finished,
}

impl TurnOutcome {
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEngine {
    grid: Grid,
    snake: Snake,
    direction: Direction,
    input_locked: bool,
    score: CellCount,
    starting_apple_count: CellCount,
    win_state: WinState,
    dirty: BTreeSet<Coord2>,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Builds a random board from `seed`, flags its loneliest apple and places the snake at the
    /// center.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let grid = Grid::generate(config, &mut rng)?;
        let starting_apple = find_orphaned_apple(&grid, &mut rng)?;
        let snake = Snake::new(config.start_head(), config.size, config.snake_length)?;

        log::debug!(
            "New game: size {}, {} apples, starting apple at {:?}",
            config.size,
            grid.apple_count(),
            starting_apple
        );
        Self::from_parts(grid, snake, Some(starting_apple))
    }

    /// Assembles a game from explicit pieces, the snake starts heading right.
    pub fn from_parts(mut grid: Grid, snake: Snake, starting_flag: Option<Coord2>) -> Result<Self> {
        if snake.board_size() != grid.size() {
            return Err(GameError::InvalidBoardShape);
        }
        if grid.apple_count() == 0 {
            return Err(GameError::NoApplesPlaced);
        }
        if let Some(coords) = starting_flag {
            grid.set_flagged(coords, true)?;
        }

        let dirty = grid.iter_coords().collect();
        let starting_apple_count = grid.apple_count();
        Ok(Self {
            grid,
            snake,
            direction: Direction::Right,
            input_locked: false,
            score: 0,
            starting_apple_count,
            win_state: WinState::Ongoing,
            dirty,
            events: Vec::from([GameEvent::GameStart]),
        })
    }

    pub fn win_state(&self) -> WinState {
        self.win_state
    }

    pub fn is_finished(&self) -> bool {
        self.win_state.is_finished()
    }

    pub fn score(&self) -> CellCount {
        self.score
    }

    pub fn starting_apple_count(&self) -> CellCount {
        self.starting_apple_count
    }

    pub fn current_apple_count(&self) -> CellCount {
        self.grid.apple_count()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    pub fn size(&self) -> Coord {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            win_state: self.win_state,
            score: self.score,
            total_apples: self.starting_apple_count,
            apples_left: self.grid.apple_count(),
        }
    }

    pub fn tile_view(&self, coords: Coord2) -> Result<TileView> {
        let coords = self.grid.validate_coords(coords)?;
        Ok(self.view_at(coords))
    }

    /// Advances the game by one step. Once finished this is a no-op returning the final snapshot.
    pub fn tick(&mut self) -> Result<Snapshot> {
        if self.is_finished() {
            log::debug!("Tick ignored, game already ended: {:?}", self.win_state);
            return Ok(self.snapshot());
        }

        let old_tail = self.snake.advance(self.direction);
        let head = self.snake.head().coords;
        self.dirty.insert(head);

        let head_tile = self.grid.tile(head)?;
        if head_tile.is_flagged() {
            if !head_tile.has_apple() {
                // frozen on the collision frame, the tail stays drawn
                self.finish(WinState::LostFlagMismatch);
                return Ok(self.snapshot());
            }
            self.eat_apple(head)?;
        }

        if !self.is_finished() && self.snake.is_self_colliding() {
            self.finish(WinState::LostSelfCollision);
        }

        if !self.is_finished() {
            self.dirty.insert(old_tail.coords);
            self.input_locked = false;
        }

        Ok(self.snapshot())
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let coords = self.grid.validate_coords(coords)?;
        if self.is_finished() || self.snake.is_occupying(coords) {
            return Ok(NoChange);
        }

        let tile = self.grid[coords];
        if !tile.is_flagged() && tile.is_revealed() {
            return Ok(NoChange);
        }

        let flagged = !tile.is_flagged();
        self.grid.set_flagged(coords, flagged)?;
        self.dirty.insert(coords);
        self.events.push(if flagged {
            GameEvent::Flag
        } else {
            GameEvent::Unflag
        });
        Ok(Changed)
    }

    /// Accepts at most one turn per tick, never a reversal.
    pub fn change_direction(&mut self, direction: Direction) -> TurnOutcome {
        use TurnOutcome::*;

        let outcome = if self.is_finished() {
            Finished
        } else if self.input_locked {
            Locked
        } else if direction == self.direction.opposite() {
            Reversal
        } else if direction == self.direction {
            Unchanged
        } else {
            self.direction = direction;
            self.input_locked = true;
            Accepted
        };

        log::trace!("Turn {:?}: {:?}", direction, outcome);
        outcome
    }

    /// Debug hook, grows the snake without eating.
    pub fn grow_snake(&mut self) -> MarkOutcome {
        if self.is_finished() {
            return MarkOutcome::NoChange;
        }
        self.snake.grow();
        MarkOutcome::Changed
    }

    /// Random autopilot, any direction except straight back.
    pub fn random_direction(&self, rng: &mut SmallRng) -> Direction {
        let reversal = self.direction.opposite();
        let choices: Vec<_> = Direction::ALL
            .into_iter()
            .filter(|&dir| dir != reversal)
            .collect();
        choices[rng.random_range(0..choices.len())]
    }

    /// Drains the tiles and events accumulated since the last frame.
    pub fn take_frame(&mut self) -> Frame {
        let dirty = core::mem::take(&mut self.dirty);
        Frame {
            snapshot: self.snapshot(),
            tiles: dirty
                .into_iter()
                .map(|coords| TileUpdate {
                    coords,
                    view: self.view_at(coords),
                })
                .collect(),
            snake: self.snake.segments().map(|segment| segment.coords).collect(),
            events: core::mem::take(&mut self.events),
        }
    }

    fn eat_apple(&mut self, coords: Coord2) -> Result<()> {
        self.grid.remove_apple(coords)?;
        self.grid.set_flagged(coords, false)?;
        let revealed = flood_reveal(&mut self.grid, coords)?;
        self.dirty.extend(revealed);
        self.snake.grow();

        self.score += 1;
        self.events.push(GameEvent::Eat);
        if self.score % SCORE_MILESTONE == 0 {
            self.events.push(GameEvent::ScoreMilestone(self.score));
        }
        log::debug!(
            "Ate apple at {:?}, score {}, {} left",
            coords,
            self.score,
            self.grid.apple_count()
        );

        if self.grid.apple_count() == 0 {
            self.finish(WinState::WonAllApples);
        }
        Ok(())
    }

    fn finish(&mut self, state: WinState) {
        if self.is_finished() {
            return;
        }

        log::debug!("Game over: {:?}", state);
        self.win_state = state;
        self.events.push(if state.is_won() {
            GameEvent::Win
        } else {
            GameEvent::Lose
        });
        // remaining apples become visible
        let apples: Vec<_> = self.grid.apple_tiles().collect();
        self.dirty.extend(apples);
    }

    fn view_at(&self, coords: Coord2) -> TileView {
        let tile = self.grid[coords];
        TileView {
            snake: self.snake.is_occupying(coords),
            flagged: tile.is_flagged(),
            surrounding_apples: tile.surrounding_apples(),
            apple: self.is_finished() && tile.has_apple(),
        }
    }
}
