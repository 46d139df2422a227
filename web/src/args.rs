use anyhow::{Context, anyhow};
use clap::Parser;
use snakesweeper_core as game;

/// Options read from the page URL hash, e.g. `#--difficulty=large&-vv`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub(crate) struct Args {
    /// What log level to use
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Board preset: small, medium or large
    #[arg(short, long)]
    pub difficulty: Option<String>,

    /// Board side length, takes precedence over the preset
    #[arg(long)]
    pub size: Option<u8>,
}

impl Args {
    pub fn from_hash(hash: &str) -> anyhow::Result<Self> {
        Self::try_parse_from(hash.split(['#', '&'])).context("Could not parse args")
    }

    pub fn game_config(&self) -> anyhow::Result<game::GameConfig> {
        if let Some(size) = self.size {
            return game::GameConfig::new(size).context("Invalid board size");
        }

        let difficulty = match self.difficulty.as_deref() {
            Some(name) => name
                .parse::<game::Difficulty>()
                .map_err(|()| anyhow!("Unknown difficulty: {name}"))?,
            None => game::Difficulty::default(),
        };
        Ok(difficulty.game_config())
    }
}
