mod script;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec3;
use tracing_subscriber::EnvFilter;
use voxbox_common::SandboxConfig;
use voxbox_input::{InputState, Key};
use voxbox_kernel::{Block, Simulation, World};
use voxbox_render::{DebugTextRenderer, RenderView, Renderer, height_map};

#[derive(Parser)]
#[command(name = "voxbox", about = "Headless voxel sandbox")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML config file; missing fields keep their defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, crate info and the effective config
    Info,
    /// Generate a world and print it
    Generate {
        /// Override the world seed
        #[arg(short, long)]
        seed: Option<u64>,
        /// Print the block list as JSON instead of a height map
        #[arg(long)]
        json: bool,
    },
    /// Run the simulation for a number of frames and print the final state
    Run {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Frame delta in seconds
        #[arg(long, default_value = "0.0166667")]
        dt: f32,
        /// Keys held for the whole run, e.g. `w,d`
        #[arg(long, value_delimiter = ',')]
        hold: Vec<String>,
        /// Input script with `<frame> <event>` lines
        #[arg(long)]
        script: Option<PathBuf>,
        /// Print the debug render of the final frame
        #[arg(long)]
        render: bool,
    },
    /// Fire a single shot from a given pose
    Shoot {
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        x: f32,
        #[arg(long, default_value = "5", allow_hyphen_values = true)]
        y: f32,
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        z: f32,
        /// Yaw in radians (0 looks down -Z)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        yaw: f32,
        /// Pitch in radians (negative looks down)
        #[arg(long, default_value = "-1.4", allow_hyphen_values = true)]
        pitch: f32,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SandboxConfig> {
    match path {
        Some(path) => Ok(SandboxConfig::load(path)?),
        None => Ok(SandboxConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Info => {
            println!("voxbox v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", voxbox_common::crate_info());
            println!("kernel: {}", voxbox_kernel::crate_info());
            println!("render: {}", voxbox_render::crate_info());
            println!("config:\n{}", config.to_yaml_string()?);
        }
        Commands::Generate { seed, json } => {
            let mut world_config = config.world.clone();
            if let Some(seed) = seed {
                world_config.seed = seed;
            }
            let world = World::new(world_config);
            if json {
                let blocks: Vec<Block> = world.blocks().copied().collect();
                println!("{}", serde_json::to_string_pretty(&blocks)?);
            } else {
                println!(
                    "seed={} blocks={} cubes={} hash={:#018x}",
                    world.config().seed,
                    world.block_count(),
                    world.level_count(),
                    world.state_hash()
                );
                print!("{}", height_map(&world, None));
            }
        }
        Commands::Run {
            frames,
            dt,
            hold,
            script: script_path,
            render,
        } => {
            let events = match &script_path {
                Some(path) => {
                    let text = std::fs::read_to_string(path)
                        .with_context(|| format!("failed to read script {}", path.display()))?;
                    script::parse(&text)?
                }
                None => Vec::new(),
            };

            let mut sim = Simulation::new(config)?;
            let mut input = InputState::new();
            for name in &hold {
                let key: Key = name.parse()?;
                input.press(key);
            }

            let mut pending = events.iter().peekable();
            let mut hits = 0usize;
            for frame in 0..frames {
                while let Some(e) = pending.next_if(|e| e.frame <= frame) {
                    input.handle(e.event);
                }
                for action in input.take_frame().actions() {
                    if let Some(hit) = action.apply(&mut sim) {
                        hits += 1;
                        println!(
                            "frame {frame}: removed column ({}, {}) h={} at distance {:.2}",
                            hit.block.gx, hit.block.gz, hit.block.h, hit.distance
                        );
                    }
                }
                sim.tick(dt);
            }

            let p = sim.player();
            println!(
                "Ran {} frames: pos=({:.3}, {:.3}, {:.3}) grounded={} blocks={} hits={hits}",
                sim.ticks(),
                p.position.x,
                p.position.y,
                p.position.z,
                p.grounded,
                sim.world().block_count()
            );
            println!(
                "dt avg={:.4} min={:.4} max={:.4} substituted={}",
                sim.clock().average(),
                sim.clock().min(),
                sim.clock().max(),
                sim.clock().substitutions()
            );
            if render {
                let view = RenderView::new(sim.player(), &sim.config().camera, 16.0 / 9.0);
                print!("{}", DebugTextRenderer::new().render(sim.world(), &view));
            }
        }
        Commands::Shoot {
            x,
            y,
            z,
            yaw,
            pitch,
        } => {
            let mut sim = Simulation::new(config)?;
            sim.place_player(Vec3::new(x, y, z), yaw, pitch);
            let before = sim.world().block_count();
            match sim.fire_shot() {
                Some(hit) => println!(
                    "Hit column ({}, {}) h={} at distance {:.2}, point=({:.2}, {:.2}, {:.2}); blocks {} -> {}",
                    hit.block.gx,
                    hit.block.gz,
                    hit.block.h,
                    hit.distance,
                    hit.point.x,
                    hit.point.y,
                    hit.point.z,
                    before,
                    sim.world().block_count()
                ),
                None => println!("Miss; blocks unchanged ({before})"),
            }
        }
    }

    Ok(())
}
