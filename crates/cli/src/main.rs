#![deny(unsafe_code)]
//! Headless driver for the Langevin sampler.
//!
//! Subcommands:
//! - `run`: render N frames with scripted input, write the last as PNG
//! - `trace`: run the integrator alone and print positions as JSON lines
//! - `field`: print the energy and gradient at a point

mod error;
mod snapshot;

use clap::{ArgAction, Parser, Subcommand};
use error::CliError;
use langevin_core::{
    step_size, EnergyField, FrameController, Input, LangevinIntegrator, NormalSampler,
    SamplerConfig, SeedMode, Vec2,
};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "langevin", about = "Langevin dynamics sampler")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` wins.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render frames and write the final one as a PNG.
    Run {
        /// Base configuration as a JSON object; flags below override it.
        #[arg(long, default_value = "{}")]
        config: String,

        /// Buffer width in pixels.
        #[arg(short = 'W', long)]
        width: Option<usize>,

        /// Buffer height in pixels.
        #[arg(short = 'H', long)]
        height: Option<usize>,

        /// Number of frames to render.
        #[arg(short, long, default_value_t = 100)]
        frames: u64,

        /// Fixed noise seed.
        #[arg(long, conflicts_with = "clock_seed")]
        seed: Option<u64>,

        /// Seed the noise from the wall clock.
        #[arg(long)]
        clock_seed: bool,

        /// Starting step-size level (step size = exp(level / 4)).
        #[arg(long, allow_hyphen_values = true)]
        step_level: Option<i32>,

        /// Particle marker radius in pixels.
        #[arg(long)]
        marker_radius: Option<u32>,

        /// JSON array of per-frame inputs; frame i uses element i.
        #[arg(long)]
        script: Option<PathBuf>,

        /// Output file path.
        #[arg(short, long, default_value = "frame.png")]
        output: PathBuf,
    },
    /// Run integrator steps without rendering and print each position.
    Trace {
        #[arg(short, long, default_value_t = 1000)]
        steps: u64,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(
            long,
            default_value_t = -26,
            allow_hyphen_values = true,
            value_parser = clap::value_parser!(i32).range(-320..=320)
        )]
        step_level: i32,

        /// Starting x in field coordinates.
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        x: f32,

        /// Starting y in field coordinates.
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        y: f32,
    },
    /// Print the energy and its gradient at a field point.
    Field {
        #[arg(allow_hyphen_values = true)]
        x: f32,
        #[arg(allow_hyphen_values = true)]
        y: f32,
    },
}

/// Overrides applied on top of the `--config` JSON.
struct RunOverrides {
    width: Option<usize>,
    height: Option<usize>,
    seed: Option<u64>,
    clock_seed: bool,
    step_level: Option<i32>,
    marker_radius: Option<u32>,
}

fn build_config(json: &str, o: &RunOverrides) -> Result<SamplerConfig, CliError> {
    let params: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| CliError::Input(format!("invalid --config JSON: {e}")))?;
    let mut config = SamplerConfig::from_json(&params);
    if let Some(w) = o.width {
        config.width = w;
    }
    if let Some(h) = o.height {
        config.height = h;
    }
    if let Some(seed) = o.seed {
        config.seed = SeedMode::Fixed(seed);
    }
    if o.clock_seed {
        config.seed = SeedMode::Clock;
    }
    if let Some(level) = o.step_level {
        config.initial_step_level = level;
    }
    if let Some(r) = o.marker_radius {
        config.marker_radius = r;
    }
    config.validate()?;
    Ok(config)
}

fn load_script(path: &Path) -> Result<Vec<Input>, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid input script {}: {e}", path.display())))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Run {
            config,
            width,
            height,
            frames,
            seed,
            clock_seed,
            step_level,
            marker_radius,
            script,
            output,
        } => {
            let overrides = RunOverrides {
                width,
                height,
                seed,
                clock_seed,
                step_level,
                marker_radius,
            };
            let config = build_config(&config, &overrides)?;
            let script = match script {
                Some(path) => load_script(&path)?,
                None => Vec::new(),
            };

            let mut ctl = FrameController::new(&config)?;
            let mut last = None;
            for i in 0..frames {
                let input = usize::try_from(i)
                    .ok()
                    .and_then(|i| script.get(i))
                    .copied()
                    .unwrap_or_default();
                last = Some(ctl.tick(&input));
            }

            snapshot::write_png(ctl.buffer(), &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": config.width,
                    "height": config.height,
                    "frames": frames,
                    "seed": ctl.seed(),
                    "last": last,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                let pos = ctl.state().position;
                eprintln!(
                    "rendered {frames} frames ({}x{}, seed {}) -> {}; particle at ({:.4}, {:.4})",
                    config.width,
                    config.height,
                    ctl.seed(),
                    output.display(),
                    pos.x,
                    pos.y
                );
            }
        }
        Command::Trace {
            steps,
            seed,
            step_level,
            x,
            y,
        } => {
            let integrator = LangevinIntegrator::default();
            let mut sampler = NormalSampler::new(seed);
            let eps = step_size(step_level);
            let mut p = Vec2::new(x, y);
            for step in 1..=steps {
                p = integrator.step(p, eps, &mut sampler);
                println!(
                    "{}",
                    serde_json::to_string(&serde_json::json!({"step": step, "x": p.x, "y": p.y}))?
                );
            }
        }
        Command::Field { x, y } => {
            let field = EnergyField;
            let energy = field.energy_at(x, y);
            let grad = field.gradient_at(x, y);
            if cli.json {
                let info = serde_json::json!({
                    "x": x,
                    "y": y,
                    "energy": energy,
                    "gradient": [grad.x, grad.y],
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("energy({x}, {y}) = {energy}");
                println!("gradient = ({}, {})", grad.x, grad.y);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        log::debug!("exiting with code {}", e.exit_code());
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
