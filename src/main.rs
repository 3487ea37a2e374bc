use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tui_snake::game::GameConfig;
use tui_snake::modes::HumanMode;
use tui_snake::store::{JsonFileStore, MemoryStore, Store};

#[derive(Parser)]
#[command(name = "tui_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Ticks per second
    #[arg(long)]
    fps: Option<u32>,

    /// JSON file with game settings; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to keep the high score
    #[arg(long)]
    store: Option<PathBuf>,

    /// Keep the high score in memory only
    #[arg(long, conflicts_with = "store")]
    no_save: bool,

    /// Write logs to this file (level from RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?,
            None => GameConfig::default(),
        };

        if self.width.is_some() || self.height.is_some() {
            let width = self.width.unwrap_or(config.grid_width());
            let height = self.height.unwrap_or(config.grid_height());
            config.set_grid(width, height);
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    // The terminal belongs to the game, so logs only go to a file.
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to initialise logger")?;

    Ok(())
}

async fn play<S: Store>(config: GameConfig, store: S) -> Result<()> {
    let mut human_mode = HumanMode::launch(config, store)?;
    human_mode.run().await
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;
    let config = cli.game_config()?;

    if cli.no_save {
        return play(config, MemoryStore::default()).await;
    }

    let path = match cli.store {
        Some(path) => path,
        None => JsonFileStore::default_path()
            .context("No data directory available; pass --store or --no-save")?,
    };
    let store = JsonFileStore::new(path);
    log::info!("High score file: {:?}", store.path());

    play(config, store).await
}
