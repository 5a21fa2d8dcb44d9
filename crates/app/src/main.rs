use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use clap::{Parser, Subcommand};
use portfolio_demos_core::{
    export::{write_svg, ExportSettings, FrameExporter},
    render_scene,
    sorting::random_array,
    AppConfig, BarState, Frame, Mesh, RotationState, Scene, ShapeKind, SortAlgorithm, SortPlayer,
    SpinAnimation,
};
use tracing_subscriber::EnvFilter;

fn main() -> portfolio_demos_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Sort {
            algorithm,
            values,
            len,
            seed,
            play,
        } => run_sort(&config, algorithm, values, len, seed, play),
        Commands::Render {
            shape,
            rx,
            ry,
            rz,
            mesh,
            svg,
        } => run_render(&config, shape, mesh, RotationState::new(rx, ry, rz), svg),
        Commands::Spin {
            shape,
            frames,
            out_dir,
        } => run_spin(&config, shape, frames, out_dir),
    }
}

fn run_sort(
    config: &AppConfig,
    algorithm: SortAlgorithm,
    values: Vec<i64>,
    len: Option<usize>,
    seed: Option<u64>,
    play: bool,
) -> portfolio_demos_core::Result<()> {
    let sorter = &config.sorter;
    let array = if values.is_empty() {
        let mut rng = fastrand::Rng::with_seed(seed.unwrap_or_else(default_seed));
        random_array(
            &mut rng,
            len.unwrap_or(sorter.array_len),
            sorter.min_value..=sorter.max_value,
        )
    } else {
        values
    };

    let complexity = algorithm.complexity();
    tracing::info!(
        %algorithm,
        elements = array.len(),
        best = complexity.best,
        average = complexity.average,
        worst = complexity.worst,
        "recording sort"
    );

    let mut player = SortPlayer::from_array(&array, algorithm, sorter.step_interval());
    tracing::info!(frames = player.recording().len(), "recording ready");

    if !play {
        for frame in player.recording() {
            println!("{}", serde_json::to_string(frame)?);
        }
        return Ok(());
    }

    player.play();
    tracing::info!(step = 0, bars = %describe(player.current()), "frame");

    let mut last = Instant::now();
    while player.is_running() {
        std::thread::sleep(sorter.step_interval());
        let now = Instant::now();
        if player.tick(now - last) {
            tracing::info!(step = player.step(), bars = %describe(player.current()), "frame");
        }
        last = now;
    }

    Ok(())
}

fn run_render(
    config: &AppConfig,
    shape: ShapeKind,
    mesh_path: Option<PathBuf>,
    rotation: RotationState,
    svg: Option<PathBuf>,
) -> portfolio_demos_core::Result<()> {
    let graphics = &config.graphics;
    let mesh = match &mesh_path {
        Some(path) => {
            tracing::info!(?path, "loading mesh");
            Mesh::load(path)?
        }
        None => Mesh::for_shape(shape, &graphics.sphere),
    };
    let [dx, dy, dz] = rotation.degrees();
    tracing::info!(%shape, x = dx, y = dy, z = dz, "rendering");

    let rendered = render_scene(&mesh, &rotation, graphics.surface);
    tracing::info!(
        faces = rendered.faces.len(),
        culled = mesh.faces.len() - rendered.faces.len(),
        "rendered scene"
    );

    match svg {
        Some(path) => {
            write_svg(&rendered, &path)?;
            tracing::info!(?path, "wrote svg");
        }
        None => println!("{}", serde_json::to_string_pretty(&rendered)?),
    }

    Ok(())
}

fn run_spin(
    config: &AppConfig,
    shape: ShapeKind,
    frames: u32,
    out_dir: PathBuf,
) -> portfolio_demos_core::Result<()> {
    let graphics = &config.graphics;
    let scene = Scene::new(shape, graphics.sphere);
    let mut spin = SpinAnimation::new(graphics.spin);
    let mut exporter = FrameExporter::new(ExportSettings {
        output_dir: out_dir,
        file_prefix: shape.name().to_string(),
    });

    exporter.start()?;
    spin.toggle();
    for _ in 0..frames {
        let rendered = render_scene(scene.mesh(), spin.rotation(), graphics.surface);
        exporter.write_frame(&rendered)?;
        spin.tick();
    }
    exporter.stop();

    Ok(())
}

/// One token per bar: `*` sorted, `?` comparing, `!` swapping.
fn describe(frame: &Frame) -> String {
    frame
        .array
        .iter()
        .zip(frame.bar_states())
        .map(|(value, state)| match state {
            BarState::Sorted => format!("{value}*"),
            BarState::Comparing => format!("{value}?"),
            BarState::Swapping => format!("{value}!"),
            BarState::Unsorted => value.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn default_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos() as u64
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Sorting visualiser and 3D shape demos", long_about = None)]
struct Cli {
    /// JSON configuration file; defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Record a sort run and print its frames, or replay it step by step.
    Sort {
        /// bubble, quick or merge.
        #[arg(short, long, default_value = "bubble")]
        algorithm: SortAlgorithm,
        /// Comma separated input; a random array is generated when omitted.
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        values: Vec<i64>,
        /// Length of the generated array.
        #[arg(long)]
        len: Option<usize>,
        /// Seed for the generated array.
        #[arg(long)]
        seed: Option<u64>,
        /// Replay the recording at the configured step interval.
        #[arg(long)]
        play: bool,
    },
    /// Render one frame of a shape as JSON or SVG.
    Render {
        #[arg(short, long, default_value = "cube")]
        shape: ShapeKind,
        /// Rotation about X in radians.
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        rx: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        ry: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        rz: f64,
        /// JSON mesh to render instead of a built-in shape.
        #[arg(long)]
        mesh: Option<PathBuf>,
        /// Write an SVG file instead of printing JSON.
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// Export consecutive animation ticks of a spinning shape as SVG files.
    Spin {
        #[arg(short, long, default_value = "cube")]
        shape: ShapeKind,
        #[arg(short, long, default_value_t = 60)]
        frames: u32,
        #[arg(short, long)]
        out_dir: PathBuf,
    },
}
