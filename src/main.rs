use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};

use gridsnake::config::{
    GameConfig, DEFAULT_BASE_SPEED, DEFAULT_GRID_SIZE, DEFAULT_MAX_SPEED,
};
use gridsnake::game::SnakeGame;
use gridsnake::GridInt;

#[derive(Parser)]
#[command(name = "gridsnake")]
#[command(about = "Terminal snake with a persisted high score")]
struct Args {
    /// Board width and height in cells
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    grid_size: GridInt,

    /// Starting speed in cells per second
    #[arg(long, default_value_t = DEFAULT_BASE_SPEED)]
    base_speed: f64,

    /// Highest speed the game will reach
    #[arg(long, default_value_t = DEFAULT_MAX_SPEED)]
    max_speed: f64,
}

fn main() -> Result<()> {
    // Quiet by default: stdout belongs to the board while in raw mode.
    Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = GameConfig {
        grid_size: args.grid_size,
        base_speed: args.base_speed,
        max_speed: args.max_speed,
        ..GameConfig::default()
    }
    .validated()?;

    SnakeGame::new(config).run()
}
