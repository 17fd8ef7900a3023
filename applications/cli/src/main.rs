/// Soundbed - background music from a folder, with smooth fades
use clap::{Parser, Subcommand};
use soundbed_cli::{config::DEFAULT_CONFIG_FILE, ConsoleEngine, FileSettingsStore};
use soundbed_core::SettingsStore;
use soundbed_playback::{FadeTimings, PlaybackController};
use soundbed_scanner::TrackScanner;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "soundbed")]
#[command(about = "Background music controller with smooth fades", long_about = None)]
struct Cli {
    /// Settings file path
    #[arg(short, long, global = true, env = "SOUNDBED_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the audio files in a folder or tree URI
    Scan {
        /// Folder path, file:// URI or tree URI
        location: String,
    },
    /// Play the configured folder, skipping forward and back once
    Play {
        /// Seconds to stay on each track
        #[arg(short, long, default_value_t = 5)]
        seconds: u64,

        /// Use and persist this folder instead of the configured one
        #[arg(long)]
        source: Option<String>,
    },
    /// Set and persist the volume (0-100)
    Volume {
        /// Volume level, clamped to 0-100
        #[arg(allow_hyphen_values = true)]
        level: i32,
    },
    /// Enable or disable background music
    Enable {
        /// true or false
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Show the effective settings
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { location } => {
            scan(&location)?;
        }
        Commands::Play { seconds, source } => {
            let settings = load_settings(&cli.config)?;
            play(settings, Duration::from_secs(seconds), source).await?;
        }
        Commands::Volume { level } => {
            let settings = load_settings(&cli.config)?;
            let mut controller = PlaybackController::new(settings.clone(), TrackScanner::new())?;
            controller.set_volume(level);
            println!("Volume set to {}", settings.settings().volume);
        }
        Commands::Enable { enabled } => {
            let settings = load_settings(&cli.config)?;
            settings.set_enabled(enabled);
            println!("Background music {}", if enabled { "enabled" } else { "disabled" });
        }
        Commands::Status => {
            let settings = load_settings(&cli.config)?;
            print_status(&settings);
        }
    }

    Ok(())
}

fn load_settings(path: &Path) -> anyhow::Result<Arc<FileSettingsStore>> {
    Ok(Arc::new(FileSettingsStore::load(path)?))
}

fn scan(location: &str) -> anyhow::Result<()> {
    let tracks = TrackScanner::new().try_scan(location)?;

    if tracks.is_empty() {
        println!("No audio files in {}", location);
        return Ok(());
    }

    println!("Found {} audio files:", tracks.len());
    for track in &tracks {
        println!("  {}", track);
    }
    Ok(())
}

async fn play(
    settings: Arc<FileSettingsStore>,
    dwell: Duration,
    source: Option<String>,
) -> anyhow::Result<()> {
    let timings = FadeTimings::default();
    let mut controller =
        PlaybackController::new(settings.clone(), TrackScanner::new())?.with_timings(timings);
    controller.initialize(ConsoleEngine::new);

    match source {
        Some(path) => controller.set_source_path(Some(path)),
        None => controller.play(),
    }

    if !controller.is_playing() {
        let current = settings.settings();
        if !current.enabled {
            println!("Background music is disabled (soundbed enable true)");
        } else if current.source().is_none() {
            println!("No folder configured (pass --source <folder>)");
        } else {
            println!("Nothing to play in {}", current.source().unwrap_or_default());
        }
        controller.release();
        return Ok(());
    }

    tokio::time::sleep(timings.play + dwell).await;

    controller.next();
    tokio::time::sleep(timings.skip_out + timings.skip_in + dwell).await;

    controller.prev();
    tokio::time::sleep(timings.skip_out + timings.skip_in + dwell).await;

    controller.pause();
    tokio::time::sleep(timings.pause + Duration::from_millis(100)).await;

    tracing::info!("Final state: {:?}", controller.state());
    controller.release();
    Ok(())
}

fn print_status(settings: &FileSettingsStore) {
    let current = settings.settings();
    println!("Settings file: {}", settings.path().display());
    println!("Enabled:       {}", current.enabled);
    println!("Volume:        {}", current.volume);
    println!("Folder:        {}", current.source().unwrap_or("(none)"));
}
