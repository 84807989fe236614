//! Rebrand CLI
//!
//! Regenerates editor icons from brand artwork.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rebrand_icons::placeholder::replace_cube_images;
use rebrand_icons::{
    ConvertOptions, ConvertReport, Fit, IconPlan, ReplacementGuide, apply_plan, copy_to_build,
    guide, ico, load_icon, svg,
};
use tracing_subscriber::EnvFilter;

/// Regenerate editor icons from brand artwork
#[derive(Parser, Debug)]
#[command(name = "rebrand", author, version, about, long_about = None)]
struct Args {
    /// Root of the editor source tree
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resize one image into every file of a plan
    Convert {
        /// Source image (ICO, PNG or BMP)
        source: PathBuf,
        /// Built-in plan (standard, cube, character) or a TOML manifest
        #[arg(long, default_value = "standard")]
        plan: String,
        /// How the source is mapped onto each size
        #[arg(long, value_enum, default_value_t = FitArg::Stretch)]
        fit: FitArg,
        /// Do not keep `.bak` copies of replaced files
        #[arg(long)]
        no_backup: bool,
        /// Skip targets whose directory is missing
        #[arg(long)]
        skip_missing_dirs: bool,
    },
    /// Centre a character image into the cube images and all icons
    Fit {
        /// Character image
        source: PathBuf,
    },
    /// Write gradient placeholder icons
    Placeholder,
    /// Replace the welcome-screen cube images
    Cube {
        /// Use this image instead of a gradient placeholder
        #[arg(long)]
        source: Option<PathBuf>,
    },
    /// Replace the title-bar SVG icon
    Svg {
        /// Embed this image instead of the "OK" badge
        #[arg(long)]
        embed: Option<PathBuf>,
    },
    /// Write the icon replacement guide
    Guide {
        /// Output file, relative to the root
        #[arg(long, default_value = guide::GUIDE_PATH)]
        output: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FitArg {
    Stretch,
    Contain,
}

impl From<FitArg> for Fit {
    fn from(arg: FitArg) -> Self {
        match arg {
            FitArg::Stretch => Fit::Stretch,
            FitArg::Contain => Fit::Contain,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("rebrand failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let root = args.root.as_path();
    match args.command {
        Command::Convert {
            source,
            plan,
            fit,
            no_backup,
            skip_missing_dirs,
        } => {
            let plan = IconPlan::resolve(&plan).with_context(|| format!("loading plan {plan}"))?;
            let options = ConvertOptions {
                fit: fit.into(),
                backup: !no_backup,
                skip_missing_dirs,
            };
            convert(&source, root, &plan, &options)?;
            if is_ico(&source) {
                copy_to_build(&source, root)?;
            }
        }
        Command::Fit { source } => {
            let options = ConvertOptions {
                fit: Fit::Contain,
                backup: true,
                skip_missing_dirs: true,
            };
            convert(&source, root, &IconPlan::character(), &options)?;
        }
        Command::Placeholder => {
            ico::placeholder_set(root)?;
        }
        Command::Cube { source: Some(source) } => {
            convert(&source, root, &IconPlan::cube(), &ConvertOptions::default())?;
        }
        Command::Cube { source: None } => {
            log_report(&replace_cube_images(root)?);
        }
        Command::Svg { embed } => {
            let content = match embed {
                Some(path) => svg::embedded_svg(&load_icon(&path)?)?,
                None => svg::badge_svg(),
            };
            svg::write_badge(root, &content)?;
        }
        Command::Guide { output } => {
            let guide = ReplacementGuide::default();
            guide.write(&root.join(output))?;
            for path in guide.missing(root) {
                tracing::warn!(path, "Icon not present in source tree");
            }
        }
    }
    Ok(())
}

fn convert(source: &Path, root: &Path, plan: &IconPlan, options: &ConvertOptions) -> Result<()> {
    let image = load_icon(source)?;
    let report = apply_plan(&image, root, plan, options)?;
    log_report(&report);
    Ok(())
}

fn log_report(report: &ConvertReport) {
    tracing::info!(
        written = report.written.len(),
        backed_up = report.backed_up.len(),
        skipped = report.skipped.len(),
        "Done, restart the application to see the new icons"
    );
}

fn is_ico(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ico"))
}
