use rand::prelude::*;
use serde::Serialize;
use snakesweeper_core as game;
use wasm_bindgen::prelude::*;

use args::Args;

mod args;
mod utils;

#[wasm_bindgen(start)]
pub fn run_app() {
    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }
}

/// Frame as handed to the JS renderer, with sound names resolved.
#[derive(Serialize)]
struct JsFrame<'a> {
    #[serde(flatten)]
    frame: &'a game::Frame,
    sounds: Vec<&'static str>,
    reason: &'static str,
}

fn to_js_error(err: anyhow::Error) -> JsError {
    JsError::new(&format!("{err:#}"))
}

/// Browser-facing handle owning one engine. The page drives `tick` from its own timer and feeds
/// input through the other methods, reading changes back with `frame_json`.
#[wasm_bindgen]
pub struct WebGame {
    engine: game::GameEngine,
    rng: SmallRng,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(location_hash: &str) -> Result<WebGame, JsError> {
        Self::from_hash(location_hash).map_err(to_js_error)
    }

    pub fn size(&self) -> u8 {
        self.engine.size()
    }

    pub fn is_finished(&self) -> bool {
        self.engine.is_finished()
    }

    pub fn score(&self) -> u16 {
        self.engine.score()
    }

    /// Advances one step and returns whether the game just ended or was already over.
    pub fn tick(&mut self) -> Result<bool, JsError> {
        let snapshot = self.engine.tick()?;
        Ok(snapshot.win_state.is_finished())
    }

    /// Accepts `up`, `down`, `left` or `right`, returns whether the turn was taken.
    pub fn change_direction(&mut self, name: &str) -> Result<bool, JsError> {
        self.turn(name).map_err(to_js_error)
    }

    pub fn toggle_flag(&mut self, x: u8, y: u8) -> Result<bool, JsError> {
        Ok(self.engine.toggle_flag((x, y))?.has_update())
    }

    /// Debug hook bound to a key on the page.
    pub fn grow(&mut self) -> bool {
        self.engine.grow_snake().has_update()
    }

    /// Picks a random non-reversing turn, for demo mode.
    pub fn autopilot(&mut self) -> bool {
        let direction = self.engine.random_direction(&mut self.rng);
        self.engine.change_direction(direction).is_accepted()
    }

    /// Changes since the previous call as JSON, the first call describes the whole board.
    pub fn frame_json(&mut self) -> Result<String, JsError> {
        Ok(self.frame()?)
    }
}

impl WebGame {
    fn from_hash(location_hash: &str) -> anyhow::Result<Self> {
        let args = Args::from_hash(location_hash)?;
        if let Some(log_level) = args.verbose.log_level() {
            if console_log::init_with_level(log_level).is_err() {
                log::set_max_level(log_level.to_level_filter());
            }
        }

        let seed = args.seed.unwrap_or_else(utils::js_random_seed);
        log::debug!("seed: {}", seed);

        let config = args.game_config()?;
        let engine = game::GameEngine::new(config, seed)?;
        log::info!(
            "Game started: {}x{}, {} apples",
            config.size,
            config.size,
            engine.starting_apple_count()
        );

        Ok(Self {
            engine,
            rng: SmallRng::seed_from_u64(seed.rotate_left(32)),
        })
    }

    fn turn(&mut self, name: &str) -> anyhow::Result<bool> {
        let direction: game::Direction = name
            .parse()
            .map_err(|()| anyhow::anyhow!("Unknown direction: {name}"))?;
        Ok(self.engine.change_direction(direction).is_accepted())
    }

    fn frame(&mut self) -> serde_json::Result<String> {
        let frame = self.engine.take_frame();
        let js_frame = JsFrame {
            frame: &frame,
            sounds: frame.events.iter().map(|event| event.name()).collect(),
            reason: frame.snapshot.win_state.reason(),
        };
        serde_json::to_string(&js_frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn web_game(hash: &str) -> WebGame {
        WebGame::from_hash(hash).unwrap()
    }

    #[test]
    fn first_frame_lists_every_tile_and_start_sound() {
        let mut game = web_game("#--seed=5&--size=8");

        let json: serde_json::Value = serde_json::from_str(&game.frame().unwrap()).unwrap();

        assert_eq!(json["tiles"].as_array().unwrap().len(), 64);
        assert_eq!(json["sounds"], serde_json::json!(["game-start"]));
        assert_eq!(json["snapshot"]["win_state"], "Ongoing");
        assert_eq!(json["snake"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn input_is_forwarded_to_engine() {
        let mut game = web_game("#--seed=5");

        assert!(game.turn("UP").unwrap());
        assert!(!game.turn("left").unwrap());
        assert!(game.turn("backwards").is_err());
        assert!(game.grow());
        assert_eq!(game.size(), 10);
    }
}
