//! Simulation results viewer entry point.
//!
//! Plays back the output of a particle simulation in 3D using:
//! - **raylib** for windowing and 3D drawing
//! - **bevy_ecs** for the entity-component-system architecture
//!
//! Two playback modes exist. `particles` streams a positions file and shows
//! one sphere per particle per frame. `densities` shows a grid of regions
//! colored by how many particles each one holds per frame.
//!
//! # Main Loop
//!
//! 1. Load `config.ini`, start the resolver thread, open the window
//! 2. Spawn the scene for the selected mode and request its results file
//! 3. Each frame: advance time, run the playback schedule, render
//! 4. Stop the resolver thread on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --mode densities
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::{Parser, ValueEnum};

use simviewer::content::resolver_from_config;
use simviewer::frames::condense::condense_file;
use simviewer::game;
use simviewer::resources::debugmode::DebugMode;
use simviewer::resources::resolverbridge::{setup_resolver, shutdown_resolver};
use simviewer::resources::viewerconfig::ViewerConfig;
use simviewer::resources::worldtime::WorldTime;
use simviewer::simulator::{Simulation, run_simulation};
use simviewer::systems::render::render_frame;
use simviewer::systems::time::update_world_time;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// One sphere per particle, one frame per line of the positions file.
    Particles,
    /// A grid of regions colored by particle density.
    Densities,
}

/// Simulation results viewer
#[derive(Parser)]
#[command(version, about = "Plays back particle simulation results in 3D.")]
struct Cli {
    /// Playback mode.
    #[arg(long, value_enum, default_value_t = Mode::Particles)]
    mode: Mode,

    /// Configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Results file name to resolve instead of the configured one.
    #[arg(long, value_name = "NAME")]
    file: Option<String>,

    /// Show the debug HUD and grid wireframe.
    #[arg(long)]
    debug: bool,

    /// Write the default configuration and exit.
    /// Optionally provide a path (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    create_config: Option<Option<PathBuf>>,

    /// Condense a particle results file into a density results file and exit.
    #[arg(long, num_args = 2, value_names = ["IN", "OUT"])]
    condense: Option<Vec<PathBuf>>,

    /// Run the particle simulation and write a results file, then exit.
    #[arg(long, num_args = 2, value_names = ["FRAMES", "PARTICLES"])]
    simulate: Option<Vec<usize>>,

    /// Output path for --simulate (default: the configured file under the source root).
    #[arg(long, value_name = "PATH", requires = "simulate")]
    output: Option<PathBuf>,

    /// Make --simulate write region densities instead of positions.
    #[arg(long, requires = "simulate")]
    densities: bool,

    /// Random seed for --simulate.
    #[arg(long, requires = "simulate")]
    seed: Option<u64>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ViewerConfig::with_path(path),
        None => ViewerConfig::new(),
    };

    // Early-exit: write the default config and quit (no window needed)
    if let Some(maybe_path) = cli.create_config {
        if let Some(path) = maybe_path {
            config.config_path = path;
        }
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Config written to {}", config.config_path.display());
        return;
    }

    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }

    // Early-exit: condense particles into densities and quit
    if let Some(paths) = &cli.condense {
        let grid = config.region_grid();
        match condense_file(&paths[0], &paths[1], &grid) {
            Ok(frames) => println!("{} frames written to {}", frames, paths[1].display()),
            Err(e) => {
                eprintln!("Error condensing {}: {e}", paths[0].display());
                std::process::exit(1);
            }
        }
        return;
    }

    // Early-exit: run the simulation and quit
    if let Some(args) = &cli.simulate {
        let (frames, particles) = (args[0], args[1]);
        if frames < 1 || particles < 1 {
            eprintln!("Error: FRAMES and PARTICLES must both be at least 1");
            std::process::exit(1);
        }
        let default_name = if cli.densities {
            &config.densities_file
        } else {
            &config.particles_file
        };
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| config.root.join(default_name));
        let mut rng = match cli.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let grid = config.region_grid();
        let mut sim = Simulation::random(particles, config.box_width, &mut rng);
        let result = File::create(&output).and_then(|file| {
            let mut out = BufWriter::new(file);
            run_simulation(
                &mut sim,
                frames,
                &mut out,
                cli.densities.then_some(&grid),
            )
        });
        match result {
            Ok(()) => println!("{} frames written to {}", frames, output.display()),
            Err(e) => {
                eprintln!("Error writing {}: {e}", output.display());
                std::process::exit(1);
            }
        }
        return;
    }

    log::info!("Starting viewer in {:?} mode", cli.mode);
    // --------------- Raylib window ---------------
    let (window_width, window_height) = config.window_size();
    let (mut rl, thread) = raylib::init()
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Simulation Viewer")
        .build();
    rl.set_target_fps(config.target_fps);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    game::setup_common(&mut world);
    world.insert_resource(WorldTime::default().with_time_scale(config.time_scale));
    setup_resolver(&mut world, resolver_from_config(&config));
    if cli.debug {
        world.insert_resource(DebugMode {});
    }

    match cli.mode {
        Mode::Particles => {
            let file = cli.file.clone().unwrap_or_else(|| config.particles_file.clone());
            game::setup_particles(&mut world, &config, &file);
        }
        Mode::Densities => {
            let file = cli.file.clone().unwrap_or_else(|| config.densities_file.clone());
            game::setup_densities(&mut world, &config, &file);
        }
    }
    world.insert_resource(config);

    let mut update = game::build_update_schedule();
    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    // --------------- Main loop ---------------
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers(); // Clear changed components for next frame

        render_frame(&mut world, &mut rl, &thread);
    }
    shutdown_resolver(&mut world);
}
