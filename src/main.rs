use anyhow::{Context, Result};
use burn::tensor::backend::Backend;
use clap::{Parser, ValueEnum};
use snake_arena::brain::{
    default_device, load_network, save_network, InferenceBackend, NetworkPolicy, PolicyNetwork,
    PolicyNetworkConfig,
};
use snake_arena::control::{Controller, LearnedController, PatrolController};
use snake_arena::game::GameConfig;
use snake_arena::metrics::HighScoreStore;
use snake_arena::modes::{evaluate, EvaluateConfig, HumanMode, WatchMode};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_arena")]
#[command(version, about = "Grid snake arena for humans, scripted bots and neural policies")]
struct Cli {
    /// Execution mode
    #[arg(long, value_enum, default_value = "human")]
    mode: Mode,

    /// Controller used by watch and evaluate modes
    #[arg(long, value_enum, default_value = "patrol")]
    agent: Agent,

    /// Saved policy network (path without extension) for the network agent
    #[arg(long)]
    model: Option<PathBuf>,

    /// Hidden units of a freshly initialized network
    #[arg(long, default_value = "8")]
    hidden: usize,

    /// Save the network used by this run to this path
    #[arg(long)]
    save_model: Option<PathBuf>,

    /// JSON game configuration; CLI flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in cells, walls included
    #[arg(long)]
    width: Option<i32>,

    /// Board height in cells, walls included
    #[arg(long)]
    height: Option<i32>,

    /// Obstacles placed per episode
    #[arg(long)]
    obstacles: Option<usize>,

    /// Initial snake length
    #[arg(long)]
    start_len: Option<usize>,

    /// Seed for board layout (and network initialization)
    #[arg(long)]
    seed: Option<u64>,

    /// Episodes to run in evaluate mode
    #[arg(long, default_value = "100")]
    episodes: usize,

    /// Worker threads for evaluate mode (defaults to available cores)
    #[arg(long)]
    workers: Option<usize>,

    /// Print the evaluation report as JSON
    #[arg(long)]
    json: bool,

    /// High score file used by human mode
    #[arg(long, default_value = "highscore.json")]
    high_score_file: PathBuf,

    /// Write logs here while the terminal UI is active
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Play with the keyboard
    Human,
    /// Watch an automated controller play
    Watch,
    /// Run many headless episodes and report statistics
    Evaluate,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Agent {
    /// Scripted column sweep
    Patrol,
    /// Burn policy network driving the learned-sensor controller
    Network,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width
                .checked_mul(config.square_size)
                .with_context(|| format!("Board width of {width} cells is too large"))?;
        }
        if let Some(height) = self.height {
            config.height = height
                .checked_mul(config.square_size)
                .with_context(|| format!("Board height of {height} cells is too large"))?;
        }
        if let Some(obstacles) = self.obstacles {
            config.num_obstacles = obstacles;
        }
        if let Some(start_len) = self.start_len {
            config.start_len = start_len;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }

    fn network(&self) -> Result<PolicyNetwork<InferenceBackend>> {
        let device = default_device();
        let (network, config) = match &self.model {
            Some(path) => {
                let (network, metadata) = load_network::<InferenceBackend>(path, &device)?;
                info!(path = ?path, version = %metadata.version, "loaded policy network");
                (network, metadata.network)
            }
            None => {
                if let Some(seed) = self.seed {
                    InferenceBackend::seed(seed);
                }
                let config = PolicyNetworkConfig::new(self.hidden);
                info!(hidden = self.hidden, "using freshly initialized policy network");
                (config.init::<InferenceBackend>(&device), config)
            }
        };
        if let Some(path) = &self.save_model {
            save_network(&network, config, path)?;
            info!(path = ?path, "saved policy network");
        }
        Ok(network)
    }

    fn init_logging(&self) -> Result<()> {
        if self.mode == Mode::Evaluate {
            let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
            return Ok(());
        }

        // The terminal UI owns stderr, so logs go to a file or nowhere
        match &self.log_file {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create log file {:?}", path))?;
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init();
            }
            None => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_writer(std::io::sink)
                    .try_init();
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.init_logging()?;
    let config = cli.game_config()?;

    match cli.mode {
        Mode::Human => {
            let store = HighScoreStore::new(&cli.high_score_file);
            let mut human_mode = HumanMode::new(config, store)?;
            human_mode.run().await?;
        }
        Mode::Watch => match cli.agent {
            Agent::Patrol => {
                WatchMode::new(config, PatrolController::new())?.run().await?;
            }
            Agent::Network => {
                let policy = NetworkPolicy::new(cli.network()?, default_device());
                WatchMode::new(config, LearnedController::new(policy))?
                    .run()
                    .await?;
            }
        },
        Mode::Evaluate => {
            let workers = cli.workers.unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1)
            });
            let eval_config = EvaluateConfig::new(config, cli.episodes, workers);

            let report = match cli.agent {
                Agent::Patrol => {
                    evaluate(&eval_config, || {
                        let controller: Box<dyn Controller + Send> = Box::new(PatrolController::new());
                        Ok(controller)
                    })
                    .await?
                }
                Agent::Network => {
                    let network = cli.network()?;
                    evaluate(&eval_config, || {
                        let policy = NetworkPolicy::new(network.clone(), default_device());
                        let controller: Box<dyn Controller + Send> =
                            Box::new(LearnedController::new(policy));
                        Ok(controller)
                    })
                    .await?
                }
            };

            if cli.json {
                let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
                println!("{}", json);
            } else {
                println!("{}", "=".repeat(60));
                println!("Evaluation (base seed {})", eval_config.base_seed);
                println!("{}", "=".repeat(60));
                println!("{}", report.format_summary());
            }
        }
    }

    Ok(())
}
