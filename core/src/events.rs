use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Named notifications for the audio collaborator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStart,
    Eat,
    Flag,
    Unflag,
    Win,
    Lose,
    ScoreMilestone(CellCount),
}

impl GameEvent {
    pub const fn name(self) -> &'static str {
        use GameEvent::*;
        match self {
            GameStart => "game-start",
            Eat => "eat",
            Flag => "flag",
            Unflag => "unflag",
            Win => "win",
            Lose => "lose",
            ScoreMilestone(_) => "score-milestone",
        }
    }
}

/// Result of a single tick, handed back to the driver.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub win_state: WinState,
    pub score: CellCount,
    pub total_apples: CellCount,
    pub apples_left: CellCount,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileUpdate {
    pub coords: Coord2,
    pub view: TileView,
}

/// Everything that changed since the previous frame was taken.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub snapshot: Snapshot,
    pub tiles: Vec<TileUpdate>,
    pub snake: Vec<Coord2>,
    pub events: Vec<GameEvent>,
}

impl Frame {
    pub fn has_updates(&self) -> bool {
        !self.tiles.is_empty() || !self.events.is_empty()
    }
}
