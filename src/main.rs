//! Widget Actions CLI
//!
//! Replays a TOML scene and prints the resulting widget geometry.
//!
//! Usage:
//!   widget-actions [OPTIONS] <SCENE>
//!
//! Options:
//!   -f, --frames <N>  Replay at most N frames
//!   -v, --verbose     Log every frame and skipped command
//!   -h, --help        Print help

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use widget_actions::Scene;

#[derive(Parser)]
#[command(name = "widget-actions")]
#[command(about = "Replay widget layout commands from a scene file")]
struct Cli {
    /// Scene file (TOML)
    scene: PathBuf,

    /// Replay at most this many frames
    #[arg(short, long)]
    frames: Option<usize>,

    /// Log every frame and skipped command
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "widget_actions=debug",
        _ => "widget_actions=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let scene = match Scene::from_file(&cli.scene) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading scene '{}': {}", cli.scene.display(), e);
            std::process::exit(1);
        }
    };

    let mut engine = match scene.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let played = scene.play(&mut engine, cli.frames);
    tracing::info!(frames = played, "replay finished");
    print!("{}", engine.report());
}
