use serde::{Deserialize, Serialize};

/// Per-tile state stored in the grid arena.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    has_apple: bool,
    flagged: bool,
    surrounding_apples: Option<u8>,
}

impl Tile {
    pub const fn with_apple(has_apple: bool) -> Self {
        Self {
            has_apple,
            flagged: false,
            surrounding_apples: None,
        }
    }

    pub const fn has_apple(self) -> bool {
        self.has_apple
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    pub const fn is_revealed(self) -> bool {
        self.surrounding_apples.is_some()
    }

    /// Apple count computed when the tile was first revealed.
    pub const fn surrounding_apples(self) -> Option<u8> {
        self.surrounding_apples
    }

    pub(crate) fn remove_apple(&mut self) -> bool {
        core::mem::replace(&mut self.has_apple, false)
    }

    pub(crate) fn set_flagged(&mut self, flagged: bool) -> bool {
        core::mem::replace(&mut self.flagged, flagged) != flagged
    }

    /// Returns `false` without touching the count when already revealed.
    pub(crate) fn reveal(&mut self, count: u8) -> bool {
        if self.is_revealed() {
            return false;
        }
        self.surrounding_apples = Some(count);
        true
    }
}

/// What the render collaborator needs to draw one tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub snake: bool,
    pub flagged: bool,
    pub surrounding_apples: Option<u8>,
    /// Only set once the game is over.
    pub apple: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_is_set_once() {
        let mut tile = Tile::default();

        assert!(tile.reveal(3));
        assert!(!tile.reveal(0));
        assert_eq!(tile.surrounding_apples(), Some(3));
    }

    #[test]
    fn flag_change_reports_only_actual_changes() {
        let mut tile = Tile::with_apple(true);

        assert!(tile.set_flagged(true));
        assert!(!tile.set_flagged(true));
        assert!(tile.set_flagged(false));
        assert!(tile.remove_apple());
        assert!(!tile.remove_apple());
    }
}
