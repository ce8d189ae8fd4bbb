use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parallax_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "parallax")]
#[command(author, version, about = "Scroll-linked animation in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (default: ~/.config/parallax/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scroll through a story in the terminal
    Run {
        /// Story file (TOML); the built-in story when omitted
        #[arg(short, long)]
        story: Option<PathBuf>,
    },
    /// Map progress values through keyframes
    Sample {
        /// Keyframes as input:output pairs, e.g. "0:0,0.5:1,1:0"
        #[arg(short, long)]
        keyframes: String,
        /// Easing applied to every segment (e.g. ease-in-out, cubic-bezier(0.16,1,0.3,1))
        #[arg(short, long)]
        ease: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Progress values to sample
        #[arg(required = true, allow_negative_numbers = true)]
        progress: Vec<f64>,
    },
    /// Print the step response of a spring
    Spring {
        #[arg(short, long, default_value_t = 100.0)]
        stiffness: f64,
        #[arg(short, long, default_value_t = 10.0)]
        damping: f64,
        #[arg(short, long, default_value_t = 1.0)]
        mass: f64,
        /// Starting value
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        from: f64,
        /// Value the spring is released towards
        #[arg(short, long, default_value_t = 1.0, allow_negative_numbers = true)]
        target: f64,
        /// Seconds to simulate
        #[arg(long, default_value_t = 1.0)]
        duration: f64,
        /// Samples per second
        #[arg(long, default_value_t = 30)]
        fps: u32,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configuration file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_from(&config_path)?;

    // The terminal UI owns the screen, so it logs to a file
    let tui = matches!(cli.command, None | Some(Commands::Run { .. }));
    init_logging(&config, tui)?;

    match cli.command {
        Some(Commands::Run { story }) => commands::run::run(config, story.as_deref()),
        None => commands::run::run(config, None),
        Some(Commands::Sample {
            keyframes,
            ease,
            json,
            progress,
        }) => commands::sample::run(&keyframes, ease.as_deref(), json, &progress),
        Some(Commands::Spring {
            stiffness,
            damping,
            mass,
            from,
            target,
            duration,
            fps,
            json,
        }) => commands::spring::run(
            commands::spring::SpringArgs {
                stiffness,
                damping,
                mass,
                from,
                target,
                duration,
                fps,
            },
            json,
        ),
        Some(Commands::Config { action }) => match action {
            ConfigAction::Path => commands::config::path(&config_path),
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init { force } => commands::config::init(&config_path, force),
        },
    }
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}
