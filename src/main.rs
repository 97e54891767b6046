use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::GameConfig;
use grid_snake::modes::HumanMode;
use grid_snake::score::{FileStore, MemoryStore, Scoreboard};
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Classic grid snake in the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid rows
    #[arg(long)]
    rows: Option<usize>,

    /// Grid columns
    #[arg(long)]
    cols: Option<usize>,

    /// Milliseconds between moves
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Points per food
    #[arg(long)]
    reward: Option<u32>,

    /// Where the top score is kept
    #[arg(long, default_value = ".grid_snake_top_score")]
    score_file: PathBuf,

    /// Keep the top score for this run only
    #[arg(long)]
    no_persist: bool,

    /// Seed for food and start positions
    #[arg(long)]
    seed: Option<u64>,

    /// Log file (the terminal belongs to the game)
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GameConfig::default(),
        };
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(reward) = self.reward {
            config.food_reward = reward;
        }
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }

    fn scoreboard(&self) -> Scoreboard {
        if self.no_persist {
            Scoreboard::new(MemoryStore::new())
        } else {
            Scoreboard::new(FileStore::new(&self.score_file))
        }
    }
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {:?}", path))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse config {:?}", path))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    WriteLogger::init(
        cli.log_level.into(),
        Config::default(),
        File::create(&cli.log_file)
            .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?,
    )
    .context("Failed to initialize logger")?;

    let config = cli.game_config()?;
    info!("Starting with {:?}", config);

    let scoreboard = cli.scoreboard();
    if scoreboard.is_persistent() {
        info!("Top score {} from {:?}", scoreboard.top_score(), cli.score_file);
    } else {
        info!("Top score is kept for this run only");
    }

    let mut human_mode = HumanMode::new(config, scoreboard, cli.seed)?;
    human_mode.run().await?;

    info!("Bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["grid_snake", "--rows", "12", "--tick-ms", "90"]);
        let config = cli.game_config().unwrap();
        assert_eq!(config.rows, 12);
        assert_eq!(config.cols, 10);
        assert_eq!(config.tick_interval_ms, 90);
        assert_eq!(config.food_reward, 100);
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "rows": 20, "cols": 25, "food_reward": 5 }"#).unwrap();

        let cli = Cli::parse_from([
            "grid_snake",
            "--config",
            path.to_str().unwrap(),
            "--cols",
            "8",
        ]);
        let config = cli.game_config().unwrap();
        assert_eq!(config.rows, 20);
        assert_eq!(config.cols, 8);
        assert_eq!(config.food_reward, 5);
    }

    #[test]
    fn test_rejects_empty_grid() {
        let cli = Cli::parse_from(["grid_snake", "--rows", "0"]);
        assert!(cli.game_config().is_err());
    }

    #[test]
    fn test_rejects_oversized_grid() {
        let cli = Cli::parse_from(["grid_snake", "--rows", "100000", "--cols", "100000"]);
        assert!(cli.game_config().is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let cli = Cli::parse_from(["grid_snake", "--config", "/nonexistent/snake.json"]);
        assert!(cli.game_config().is_err());
    }
}
