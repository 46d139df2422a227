use serde::{Deserialize, Serialize};

use crate::*;

pub const MIN_RECOMMENDED_SIZE: Coord = 8;
pub const MAX_RECOMMENDED_SIZE: Coord = 32;
pub const DEFAULT_SNAKE_LENGTH: Coord = 6;

const BASE_APPLE_CHANCE: f64 = 0.125;
const APPLE_CHANCE_PER_SIZE: f64 = 0.002;
const MAX_APPLE_CHANCE: f64 = 0.25;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub snake_length: Coord,
}

impl GameConfig {
    pub fn new(size: Coord) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidBoardSize);
        }
        if !(MIN_RECOMMENDED_SIZE..=MAX_RECOMMENDED_SIZE).contains(&size) {
            log::warn!(
                "Board size {} outside of recommended range {}..={}",
                size,
                MIN_RECOMMENDED_SIZE,
                MAX_RECOMMENDED_SIZE
            );
        }
        Ok(Self {
            size,
            snake_length: DEFAULT_SNAKE_LENGTH.min(size),
        })
    }

    /// Independent per-tile apple probability, grows mildly with the board.
    pub fn apple_chance(&self) -> f64 {
        apple_chance(self.size)
    }

    /// Head position of a freshly placed snake.
    pub const fn start_head(&self) -> Coord2 {
        if self.size == 0 {
            return (0, 0);
        }
        let center = self.size.div_ceil(2) % self.size;
        (center, center)
    }
}

pub fn apple_chance(size: Coord) -> f64 {
    let chance = BASE_APPLE_CHANCE + APPLE_CHANCE_PER_SIZE * f64::from(size);
    chance.min(MAX_APPLE_CHANCE)
}

/// Board presets offered by the landing page.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Small,
    Medium,
    Large,
}

impl Difficulty {
    pub const fn board_size(self) -> Coord {
        match self {
            Self::Small => 10,
            Self::Medium => 16,
            Self::Large => 24,
        }
    }

    pub fn game_config(self) -> GameConfig {
        GameConfig {
            size: self.board_size(),
            snake_length: DEFAULT_SNAKE_LENGTH,
        }
    }
}

impl core::str::FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("small") => Ok(Self::Small),
            s if s.eq_ignore_ascii_case("medium") => Ok(Self::Medium),
            s if s.eq_ignore_ascii_case("large") => Ok(Self::Large),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_is_rejected() {
        assert_eq!(GameConfig::new(0), Err(GameError::InvalidBoardSize));
    }

    #[test]
    fn apple_chance_scales_and_caps() {
        assert!((apple_chance(10) - 0.145).abs() < 1e-9);
        assert!((apple_chance(32) - 0.189).abs() < 1e-9);
        assert_eq!(apple_chance(100), 0.25);
        assert_eq!(apple_chance(200), 0.25);
    }

    #[test]
    fn snake_length_never_exceeds_board() {
        assert_eq!(GameConfig::new(4).unwrap().snake_length, 4);
        assert_eq!(GameConfig::new(10).unwrap().snake_length, DEFAULT_SNAKE_LENGTH);
    }

    #[test]
    fn start_head_is_rounded_up_center() {
        assert_eq!(GameConfig::new(10).unwrap().start_head(), (5, 5));
        assert_eq!(GameConfig::new(9).unwrap().start_head(), (5, 5));
        assert_eq!(GameConfig::new(1).unwrap().start_head(), (0, 0));

        let empty = GameConfig {
            size: 0,
            snake_length: 0,
        };
        assert_eq!(empty.start_head(), (0, 0));
    }

    #[test]
    fn difficulty_presets_parse() {
        assert_eq!("Medium".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!(Difficulty::Large.game_config().size, 24);
        assert!("insane".parse::<Difficulty>().is_err());
    }
}
