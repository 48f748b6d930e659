//! glint: render a sphere scene with a path tracer.
//!
//! Writes an ASCII PPM to stdout by default, or to a `.ppm`/`.png` file.
//!
//! Example usage:
//!   glint --samples 100 --scale 2 > spheres.ppm
//!   glint --scene scene.json --output spheres.png

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glint_core::{load_config, load_scene, RenderConfig, SceneDescription};
use glint_renderer::{save_image, write_ppm, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(version)]
#[command(about = "Path trace a scene of spheres into a PPM or PNG image")]
struct Cli {
    /// Scene description (JSON); the built-in four-sphere scene if omitted
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Render configuration (JSON); flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Anti-aliasing samples per pixel
    #[arg(short, long)]
    samples: Option<u32>,

    /// Multiplier on the 200x100 base resolution
    #[arg(long)]
    scale: Option<u32>,

    /// Maximum number of bounces per path
    #[arg(long)]
    max_depth: Option<u32>,

    /// Seed for the per-pixel random streams
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (0 = one per core)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Render one pixel at a time on the calling thread
    #[arg(long)]
    serial: bool,

    /// Output file (.ppm or .png), or '-' for PPM on stdout
    #[arg(short, long, default_value = "-")]
    output: PathBuf,

    /// Logging level; overrides RUST_LOG
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

impl Cli {
    /// Defaults, then the config file, then command line flags.
    fn render_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => RenderConfig::default(),
        };

        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if self.serial {
            config.parallel = false;
        }

        config.validate().context("Invalid render configuration")?;
        Ok(config)
    }

    fn scene_description(&self) -> Result<SceneDescription> {
        match &self.scene {
            Some(path) => load_scene(path)
                .with_context(|| format!("Failed to load scene {}", path.display())),
            None => Ok(SceneDescription::default_scene()),
        }
    }

    fn writes_to_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }
}

fn init_logging(level: Option<LogLevel>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.filter_level(level.into());
    }
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let config = cli.render_config()?;
    if config.parallel && config.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build_global()
            .context("Failed to build render thread pool")?;
    }

    let description = cli.scene_description()?;
    let scene = Scene::from_description(&description)
        .with_context(|| format!("Failed to build scene '{}'", description.name))?;
    log::info!(
        "Scene '{}': {} spheres, {} materials",
        description.name,
        description.sphere_count(),
        description.material_count()
    );

    let image = scene.render(&config);

    if cli.writes_to_stdout() {
        let stdout = io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        write_ppm(&mut writer, &image).context("Failed to write image to stdout")?;
        writer.flush().context("Failed to flush stdout")?;
    } else {
        save_image(&cli.output, &image)
            .with_context(|| format!("Failed to save {}", cli.output.display()))?;
    }

    Ok(())
}
