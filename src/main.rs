use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use image_manager::config::{self, ManagerConfig};
use image_manager::error::Error;
use image_manager::imaging::RustCodec;
use image_manager::output;
use image_manager::pipeline::{self, Operations, RunPlan};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Flags for a processing run.
#[derive(clap::Args, Clone, Debug)]
struct RunArgs {
    /// File or directory to process
    #[arg(required = true)]
    path: Option<PathBuf>,

    /// Convert JPEG files (detected by content) to PNG
    #[arg(short = 'p', long)]
    png_convert: bool,

    /// Rename files to sanitized names
    #[arg(short = 'n', long)]
    rename: bool,

    /// Resize image files (needs --ratio, --width or --height)
    #[arg(short = 'r', long)]
    resize: bool,

    /// Round the corners of image files (PNG, TIFF, WebP)
    #[arg(short = 'c', long)]
    corner_round: bool,

    /// Keep originals: don't delete converted JPEGs, write resized copies
    #[arg(short = 'k', long)]
    keep_originals: bool,

    /// Name converted PNGs after the sanitized file name
    #[arg(short = 's', long)]
    sanitize: bool,

    /// Scale factor for --resize
    #[arg(long, value_name = "F")]
    ratio: Option<f64>,

    /// Target width in pixels for --resize
    #[arg(long, value_name = "PX")]
    width: Option<u32>,

    /// Target height in pixels for --resize
    #[arg(long, value_name = "PX")]
    height: Option<u32>,

    /// Corner radius in pixels for --corner-round
    #[arg(long, value_name = "PX")]
    radius: Option<u32>,

    /// Suffix for resized copies when keeping originals
    #[arg(long, value_name = "S")]
    suffix: Option<String>,

    /// TOML config file (run 'image-manager gen-config' for a template)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl RunArgs {
    fn operations(&self) -> Operations {
        Operations {
            convert: self.png_convert,
            rename: self.rename,
            resize: self.resize,
            round_corners: self.corner_round,
        }
    }

    /// Apply flags on top of the file-backed config.
    ///
    /// Any sizing flag replaces all sizing settings from the file, so
    /// `--width` on the command line does not combine with a `ratio` there.
    fn apply_to(&self, config: &mut ManagerConfig) {
        if self.keep_originals {
            config.keep_originals = true;
        }
        if self.sanitize {
            config.convert.sanitize_names = true;
        }
        if self.ratio.is_some() || self.width.is_some() || self.height.is_some() {
            config.resize.ratio = self.ratio;
            config.resize.width = self.width;
            config.resize.height = self.height;
        }
        if let Some(suffix) = &self.suffix {
            config.resize.suffix = suffix.clone();
        }
        if let Some(radius) = self.radius {
            config.corners.radius = radius;
        }
    }
}

#[derive(Parser)]
#[command(name = "image-manager", version)]
#[command(about = "Batch-convert, rename, resize and round the corners of images")]
#[command(long_about = "\
Batch-convert, rename, resize and round the corners of images

Walks PATH recursively (hidden files and symlinks are skipped) and applies
the selected operations in this order:

  --png-convert    JPEG -> PNG; the JPEG is deleted unless --keep-originals
  --rename         '9cool(name).png' -> 'spr_cool_name.png'
  --resize         --ratio 0.5 | --width 800 | --height 600 | both
  --corner-round   corners become transparent (not possible for JPEG)

Files are changed in place. The first error stops the run.

Run 'image-manager gen-config' to generate a documented config file.")]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    run: RunArgs,

    /// More log output on stderr (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Print a stock config file with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Command::GenConfig) => {
            print!("{}", config::stock_config_toml());
            ExitCode::SUCCESS
        }
        None => match run(&cli.run) {
            Ok(code) => code,
            Err(err) => {
                eprintln!("Error: {err}");
                ExitCode::FAILURE
            }
        },
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

fn run(args: &RunArgs) -> Result<ExitCode, Error> {
    let operations = args.operations();
    let Some(root) = args.path.as_deref().filter(|_| operations.any()) else {
        eprintln!("No operation selected: pass at least one of -p, -n, -r, -c.\n");
        eprintln!("{}", Cli::command().render_help());
        return Ok(ExitCode::from(2));
    };

    let mut config = config::load_config(args.config.as_deref())?;
    args.apply_to(&mut config);
    config.validate()?;

    let plan = RunPlan::from_config(&config, operations)?;
    process(root, &plan)?;
    Ok(ExitCode::SUCCESS)
}

fn process(root: &Path, plan: &RunPlan) -> Result<(), Error> {
    let codec = RustCodec::new();
    pipeline::run(root, plan, &codec, |event| output::print_run_event(&event))?;
    Ok(())
}
