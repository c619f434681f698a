use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use phenology::commands::{
    format_grid, frame_json, open_session, report_progress, summarize, write_export,
};
use phenology::{App, Overrides, Settings, default_log_dir, init_logging};

#[derive(Parser, Debug)]
#[command(name = "phenology")]
#[command(about = "Explore arrival, laying and hatching dates across a solver parameter sweep")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to the settings file (default: ./phenology.yaml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for phenology.log (default: ~/.phenology/)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(flatten)]
    range: RangeArgs,
}

/// Overrides for the sweep section of the settings file
#[derive(ClapArgs, Debug)]
struct RangeArgs {
    /// Lower bound of the u_q sweep
    #[arg(long, global = true)]
    min: Option<f64>,

    /// Upper bound of the u_q sweep
    #[arg(long, global = true)]
    max: Option<f64>,

    /// Sweep step
    #[arg(long, global = true)]
    step: Option<f64>,

    /// Sweep cache file
    #[arg(long, global = true)]
    cache: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive chart (default)
    View {
        /// Ignore the cache and rerun the solver for every grid point
        #[arg(long)]
        recompute: bool,
    },
    /// Load or compute the sweep and print a summary
    Sweep {
        /// Ignore the cache and rerun the solver for every grid point
        #[arg(long)]
        recompute: bool,
    },
    /// Write the line and patch data for one grid value as JSON
    Export {
        /// Grid value to export
        #[arg(long = "u-q", allow_negative_numbers = true)]
        u_q: f64,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the grid points of the configured range
    Grid,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let log_dir = args.log_dir.unwrap_or_else(default_log_dir);

    init_logging(&log_dir, &args.log_level)?;

    let mut settings = Settings::load(args.config.as_deref())?;
    settings.apply(&Overrides {
        min: args.range.min,
        max: args.range.max,
        step: args.range.step,
        cache_path: args.range.cache,
    });

    match args.command.unwrap_or(Command::View { recompute: false }) {
        Command::Grid => {
            println!("{}", format_grid(&settings.sweep_config()?));
        }
        Command::Sweep { recompute } => {
            let cache = settings.sweep_cache(recompute)?;
            let mut solver = settings.build_solver();
            let session = open_session(&cache, solver.as_mut(), report_progress)?;
            println!("{}", summarize(&session, cache.file().path()));
        }
        Command::Export { u_q, output } => {
            let cache = settings.sweep_cache(false)?;
            let mut solver = settings.build_solver();
            let session = open_session(&cache, solver.as_mut(), report_progress)?;
            write_export(&frame_json(&session, u_q)?, output.as_deref())?;
        }
        Command::View { recompute } => {
            let cache = settings.sweep_cache(recompute)?;
            let mut solver = settings.build_solver();
            let session = open_session(&cache, solver.as_mut(), report_progress)?;

            let mut app = App::new(session, settings.view.clone());
            ratatui::run(|terminal| app.run(terminal))?;

            tracing::info!("Application shutting down");

            if let Err(err) = ratatui::try_restore() {
                tracing::error!("Failed to restore terminal: {err}");
            }
        }
    }

    Ok(())
}
