use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use reefscape_common::EntityId;
use reefscape_input::{PointerEvent, PointerMapper};
use reefscape_render::{
    DebugTextRenderer, RecordingHost, RenderView, Renderer, TreasureCounter, sync_frame,
    sync_meshes,
};
use reefscape_scene::{ActorKind, Aquarium, SceneBuilder, SceneConfig};
use reefscape_tools::{MeshStats, SceneInspector};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reefscape-cli", about = "Headless driver for the underwater aquarium")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene configuration (.yaml, .yml or .json); the stock scene if omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and scene configuration summary
    Info,
    /// Run the frame loop against a recording host
    Simulate {
        /// Simulated seconds
        #[arg(long, default_value = "10")]
        seconds: f32,
        /// Frames per simulated second
        #[arg(long, default_value = "60")]
        fps: u32,
        /// Scene seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// List every actor in the final render
        #[arg(long)]
        actors: bool,
    },
    /// Click every chest in turn and report the treasure counter
    Treasure {
        /// Scene seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
    /// Print statistics for every generated mesh
    Meshes {
        /// Scene seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
    /// Print the scene configuration as YAML
    DumpConfig,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SceneConfig> {
    match path {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading scene config {}", path.display())),
        None => Ok(SceneConfig::default()),
    }
}

fn build(config: &SceneConfig, seed: u64) -> anyhow::Result<Aquarium> {
    let aquarium = SceneBuilder::new(config.clone(), seed)
        .build()
        .context("building aquarium")?;
    tracing::info!(seed, actors = aquarium.actor_count(), "scene ready");
    Ok(aquarium)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Info => {
            println!("reefscape-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "floor: {0}x{0} ({1} subdivisions)",
                config.floor.size, config.floor.subdivisions
            );
            println!(
                "rocks: {}  seaweed: {}  reefs: {}",
                config.rocks.count,
                config.seaweed.count,
                config.reefs.len()
            );
            println!(
                "fish: {} in {} schools",
                config.schools.iter().map(|s| s.count).sum::<u32>(),
                config.schools.len()
            );
            println!(
                "chests: {}  bubbles: {}  dust: {}  fog: {}",
                config.chests.len(),
                config.bubbles.count,
                config.dust.count,
                config.fog.len()
            );
            println!(
                "sand patches: {}  light rays: {}",
                config.sand.count, config.light_rays.count
            );
            println!(
                "motion: bubble_period={} lid_damping={}",
                config.motion.bubble_period, config.motion.lid_damping
            );
        }
        Commands::Simulate {
            seconds,
            fps,
            seed,
            actors,
        } => {
            anyhow::ensure!(fps > 0, "--fps must be positive");
            anyhow::ensure!(
                seconds.is_finite() && seconds >= 0.0,
                "--seconds must be finite and non-negative"
            );
            let mut aquarium = build(&config, seed)?;
            let mut host = RecordingHost::new();
            let meshes = sync_meshes(&aquarium, &mut host)?;
            let mut counter = TreasureCounter::new(aquarium.chest_count());
            aquarium.drain_events();

            let frames = (seconds * fps as f32).round() as u64;
            println!("Simulating seed={seed}: {frames} frames at {fps} fps, {meshes} meshes");
            for frame in 1..=frames {
                aquarium.advance(frame as f32 / fps as f32);
                sync_frame(&aquarium, &mut host);
                counter.observe(&aquarium.drain_events());
            }
            tracing::info!(
                frames = host.frames(),
                opened = aquarium.opened_count(),
                "simulation finished"
            );

            let renderer = if actors {
                DebugTextRenderer::verbose()
            } else {
                DebugTextRenderer::new()
            };
            print!("{}", renderer.render(&aquarium, &RenderView::default()));
            println!("{}", SceneInspector::summary(&aquarium));
            println!(
                "Host: frames={} nodes={} vertices={}",
                host.frames(),
                host.node_count(),
                host.vertex_count()
            );
            println!("{}", counter.label());
            println!("State hash: {:#018x}", aquarium.state_hash());
        }
        Commands::Treasure { seed } => {
            let mut aquarium = build(&config, seed)?;
            let mut counter = TreasureCounter::new(aquarium.chest_count());
            let mut pointer = PointerMapper::new();
            let chests: Vec<EntityId> =
                SceneInspector::list_actors(&aquarium, Some(ActorKind::Chest));
            aquarium.drain_events();
            println!("{}", counter.label());

            let mut frame = 0u64;
            let mut step = |aquarium: &mut Aquarium, counter: &mut TreasureCounter| {
                frame += 1;
                aquarium.advance(frame as f32 / 60.0);
                counter.observe(&aquarium.drain_events());
            };

            // Every chest once, then the first one again.
            for chest in chests.iter().chain(chests.first()) {
                for event in [
                    PointerEvent::moved(Some(*chest)),
                    PointerEvent::click(Some(*chest)),
                    PointerEvent::moved(None),
                ] {
                    aquarium.handle_all(&pointer.map(event));
                }
                step(&mut aquarium, &mut counter);
                let opened = aquarium.chest(*chest).is_some_and(|c| c.is_open());
                println!(
                    "click chest [{}]: open={opened}  {}",
                    chest.short(),
                    counter.label()
                );
            }

            // Let the lids settle.
            for _ in 0..120 {
                step(&mut aquarium, &mut counter);
            }
            tracing::info!(
                found = counter.found(),
                total = counter.total(),
                "treasure hunt finished"
            );
            for (id, chest) in aquarium.chests() {
                let items = chest.treasure().map_or(0, <[_]>::len);
                println!(
                    "chest [{}]: lid={:.3} treasure={items}",
                    id.short(),
                    chest.lid_angle()
                );
            }
            println!(
                "Treasures {} / {}{}",
                counter.found(),
                counter.total(),
                if counter.all_found() { " (all found)" } else { "" }
            );
        }
        Commands::Meshes { seed } => {
            let aquarium = build(&config, seed)?;
            let mut vertices = 0;
            let mut triangles = 0;
            for (handle, mesh) in aquarium.meshes() {
                let stats = MeshStats::of(mesh);
                vertices += stats.vertices;
                triangles += stats.triangles;
                println!("  mesh {:>4}: {stats}", handle.0);
            }
            println!(
                "Meshes: {}  vertices: {vertices}  triangles: {triangles}",
                aquarium.meshes().len()
            );
        }
        Commands::DumpConfig => {
            print!("{}", config.to_yaml()?);
        }
    }

    Ok(())
}
