#![no_std]

extern crate alloc;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use events::*;
pub use grid::*;
pub use placement::*;
pub use reveal::*;
pub use snake::*;
pub use tile::*;
pub use types::*;

mod config;
mod engine;
mod error;
mod events;
mod grid;
mod placement;
mod reveal;
mod snake;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}
