mod config;
mod input;
mod text_surface;

use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;
use viper_common::config::Validate;
use viper_common::game::{BoardGeometry, GameLoop, GameSession, Layers, SharedTaskHost};
use viper_common::geometry::Grid;
use viper_common::logger::{self, LogTarget};
use viper_common::{GameError, log};

use config::ViperConfig;
use text_surface::{Layer, TextCanvas};

#[derive(Parser)]
#[command(name = "viper")]
struct Args {
    /// Config file; defaults to viper_config.yaml next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    dynamic_food: bool,
    /// Seconds of play, `0` for no limit.
    #[arg(long)]
    time_limit: Option<f64>,
    #[arg(long)]
    use_log_prefix: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut ViperConfig) {
        if let Some(seed) = self.seed {
            config.game.seed = Some(seed);
        }
        if self.dynamic_food {
            config.game.prepare_food = false;
        }
        if let Some(time_limit) = self.time_limit {
            config.game.time_limit = time_limit;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Viper".to_string())
    } else {
        None
    };
    // stdout belongs to the board
    logger::init_logger(prefix, LogTarget::Stderr);

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run(args));
    // the stdin reader sits in a blocking read that cannot be interrupted
    runtime.shutdown_background();
    result
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = args.config.clone().unwrap_or_else(config::default_config_path);
    let mut viper_config = config::get_config_manager(&config_path).get_config()?;
    args.apply_overrides(&mut viper_config);
    viper_config
        .validate()
        .map_err(GameError::InvalidConfiguration)?;
    log!("Loaded config from {}", config_path.display());

    let board = viper_config.board.build()?;
    let canvas = TextCanvas::new(&board, Grid::new(board.center(), viper_config.game.snake_width));
    let session = GameSession::new(board, &viper_config.game)?;
    log!("Starting session with seed {}", session.seed());

    let (tx, rx) = mpsc::unbounded_channel();
    let cancel = SharedTaskHost::new();

    tokio::spawn(input::read_commands(tokio::io::stdin(), tx, cancel.clone()));

    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log!("Interrupt received, stopping game...");
            interrupt.cancel();
        }
    });

    let layers = Layers::new(canvas.layer(Layer::Snake), canvas.layer(Layer::Food));
    let game_loop = GameLoop::new(session, &viper_config.game, layers, cancel.clone(), rx);
    let report = game_loop.run().await?;

    println!(
        "Game over: {:?} after {} ticks, length {}, food eaten {} ({:.0}% of time limit)",
        report.outcome,
        report.ticks,
        report.snake_length,
        report.food_eaten,
        cancel.progress()
    );
    Ok(())
}
