use clap::{Parser, Subcommand};
use spacefight_assets::{AssetSource, FsAssetSource, Manifest};
use spacefight_engine::{Engine, EngineConfig, Viewport};
use spacefight_game::{BuiltinAssetSource, GameConfig, demo_manifest, populate};
use spacefight_input::InputEvent;
use spacefight_render::DebugTextRenderer;
use spacefight_tools::EngineInspector;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spacefight", about = "Headless runner for the space-shooter demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the built-in manifest size
    Info,
    /// List the entries of an asset manifest
    Manifest {
        /// Manifest JSON file (defaults to the built-in demo manifest)
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Write the listed manifest to this path as JSON
        #[arg(long)]
        write: Option<PathBuf>,
    },
    /// Load assets, build the demo scene and run a number of frames
    Run {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "120")]
        ticks: u64,
        /// Seconds per frame
        #[arg(long, default_value = "0.016", value_parser = parse_frame_dt)]
        dt: Duration,
        /// Asset directory; without it procedural placeholders are used
        #[arg(long)]
        assets: Option<PathBuf>,
        /// Manifest JSON file
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Engine config JSON file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Gameplay config JSON file
        #[arg(long)]
        game_config: Option<PathBuf>,
        /// Key or button held for the whole run (`w`, `space`, `shift`, `mouse0`, ...)
        #[arg(long = "hold", value_name = "KEY")]
        hold: Vec<String>,
        /// Pointer position in viewport pixels, as X,Y
        #[arg(long, value_parser = parse_pointer)]
        pointer: Option<(f32, f32)>,
        /// Viewport size, as WIDTHxHEIGHT
        #[arg(long, value_parser = parse_viewport)]
        viewport: Option<Viewport>,
        /// Print the inspector summary and entity list
        #[arg(long)]
        inspect: bool,
    },
}

fn parse_pointer(s: &str) -> Result<(f32, f32), String> {
    let (x, y) = s.split_once(',').ok_or("expected X,Y")?;
    let x = x.trim().parse().map_err(|e| format!("bad X: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad Y: {e}"))?;
    Ok((x, y))
}

fn parse_frame_dt(s: &str) -> Result<Duration, String> {
    let secs: f64 = s.trim().parse().map_err(|e| format!("bad seconds: {e}"))?;
    if secs < 0.0 {
        return Err("must not be negative".into());
    }
    Duration::try_from_secs_f64(secs).map_err(|e| e.to_string())
}

fn parse_viewport(s: &str) -> Result<Viewport, String> {
    let (w, h) = s.split_once(['x', 'X']).ok_or("expected WIDTHxHEIGHT")?;
    let width = w.trim().parse().map_err(|e| format!("bad width: {e}"))?;
    let height = h.trim().parse().map_err(|e| format!("bad height: {e}"))?;
    Ok(Viewport::new(width, height))
}

/// Host event for a held key name as typed on the command line.
fn hold_event(key: &str) -> InputEvent {
    let key = key.to_lowercase();
    if let Some(button) = key.strip_prefix("mouse").and_then(|n| n.parse().ok()) {
        return InputEvent::ButtonDown(button);
    }
    match key.as_str() {
        "space" => InputEvent::KeyDown(" ".into()),
        _ => InputEvent::KeyDown(key),
    }
}

fn load_manifest(file: Option<PathBuf>) -> anyhow::Result<Manifest> {
    Ok(match file {
        Some(path) => Manifest::from_json_file(path)?,
        None => demo_manifest(),
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("spacefight v{}", env!("CARGO_PKG_VERSION"));
            println!("demo manifest: {} entries", demo_manifest().len());
            println!("engine defaults: {:?}", EngineConfig::default());
        }
        Commands::Manifest { file, write } => {
            let manifest = load_manifest(file)?;
            println!("{} entries", manifest.len());
            for entry in &manifest.entries {
                let category = entry.category.to_string();
                println!("  {category:<8} {:<12} {}", entry.name, entry.locator);
            }
            if let Some(path) = write {
                manifest.save(&path)?;
                println!("written to {}", path.display());
            }
        }
        Commands::Run {
            ticks,
            dt,
            assets,
            manifest,
            config,
            game_config,
            hold,
            pointer,
            viewport,
            inspect,
        } => {
            let mut engine_config = match config {
                Some(path) => EngineConfig::from_json_file(path)?,
                None => EngineConfig::default(),
            };
            if let Some(viewport) = viewport {
                engine_config.viewport = viewport;
            }
            let game_config = match game_config {
                Some(path) => GameConfig::from_json_file(path)?,
                None => GameConfig::default(),
            };
            let manifest = load_manifest(manifest)?;
            let source: Box<dyn AssetSource> = match assets {
                Some(dir) => Box::new(FsAssetSource::new(dir)),
                None => Box::new(BuiltinAssetSource),
            };

            let mut score = None;
            let mut engine = Engine::boot(engine_config, &manifest, source.as_ref(), |engine| {
                score = Some(populate(engine, &game_config)?);
                Ok(())
            })
            .await?;

            for key in &hold {
                engine.handle_input(&hold_event(key));
            }
            if let Some((x, y)) = pointer {
                engine.handle_input(&InputEvent::PointerMoved { x, y });
            }

            let mut cues = 0;
            for _ in 0..ticks {
                engine.step(dt);
                for cue in engine.drain_sound_cues() {
                    tracing::debug!(clip = %cue.clip, volume = cue.volume, "sound cue");
                    cues += 1;
                }
            }

            print!("{}", engine.render(&DebugTextRenderer::new()));
            let cursor = if engine.overlay().cursor_visible() {
                "shown"
            } else {
                "hidden"
            };
            println!("=== Overlay (cursor {cursor}) ===");
            print!("{}", engine.overlay());
            println!(
                "score={} sound_cues={cues}",
                score.map(|s| s.get()).unwrap_or_default()
            );

            if inspect {
                println!("{}", EngineInspector::summary(&engine));
                for info in EngineInspector::list_entities(&engine) {
                    println!("  {info}");
                }
            }
        }
    }

    Ok(())
}
