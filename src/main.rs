// icon-tool - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading
// 3. Logging initialisation (debug mode support)
// 4. Dispatch to the batch commands

use clap::{CommandFactory, Parser, Subcommand};
use icon_tool::app::batch;
use icon_tool::app::toolbox::Toolbox;
use icon_tool::core::catalog::IconCatalog;
use icon_tool::platform::config::{self, AppConfig};
use icon_tool::platform::tools::ToolEnv;
use icon_tool::util;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const EPILOG: &str = "\
File layout
===========

The tool works with files from the \"sizes\" directory. The \"scalable\"
directory contains SVGs to be used as sources for raster icons.
Directories with names of icon sizes in pixels serve two purposes:

  * They may contain alternative SVGs optimized for small sizes. Each
    such SVG, if any, will only be considered if there is a primary
    SVG in the \"scalable\" directory.

  * They define sizes and location of the PNGs generated by the
    gen_png command.

Dependencies
============

The tool depends on several programs:
  * Unix-like systems:
    * rsvg-convert or Inkscape
    * optipng
    * The gen_ico command additionally requires:
      * ImageMagick
      * icotool from the icoutils package if ImageMagick < 6.7.8
  * Windows:
    * ImageMagick >= 7. It's strongly recommended to use binaries
      from the official website, as other versions (e.g. from MSYS2)
      may be misconfigured, resulting in incorrect SVG rendering and
      other problems.
    * optipng
";

/// Icon maintenance tool.
#[derive(Parser, Debug)]
#[command(name = "icon-tool", version, about, after_help = EPILOG)]
struct Cli {
    /// Directory containing the "sizes" tree.
    #[arg(short = 'r', long = "root", default_value = ".")]
    root: PathBuf,

    /// Configuration file (defaults to <root>/icon-tool.toml if present).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate PNG icons.
    #[command(name = "gen_png")]
    GenPng {
        /// Icon name to generate PNG for. This is the name of an SVG image
        /// from the "sizes/scalable" directory, without the ".svg"
        /// extension. A special name "all" can be used to include all names.
        #[arg(required = true, value_name = "ICON_NAME")]
        icon_names: Vec<String>,

        /// Overwrite existing files.
        #[arg(long = "force-overwrite")]
        force_overwrite: bool,
    },

    /// Remove PNGs that no longer have corresponding SVGs in the
    /// "sizes/scalable" directory.
    #[command(name = "remove_outdated_png")]
    RemoveOutdatedPng,

    /// Generate the application icon in the ICO format.
    #[command(name = "gen_ico")]
    GenIco,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    };

    let (app_config, config_warnings) = match config::load_config(cli.config.as_deref(), &cli.root)
    {
        Ok(loaded) => loaded,
        Err(e) => {
            util::logging::init(cli.debug, None);
            tracing::error!(error = %e, "Failed to load configuration");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    util::logging::init(cli.debug, app_config.log_level.as_deref());
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
    }

    tracing::info!(
        version = util::constants::APP_VERSION,
        root = %cli.root.display(),
        "icon-tool starting"
    );

    match run(command, &cli.root, &app_config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, root: &Path, app_config: &AppConfig) -> util::error::Result<()> {
    let catalog = IconCatalog::new(root);
    let toolbox = Toolbox::new(ToolEnv::from_process(&app_config.extra_search_dirs));

    match command {
        Command::GenPng {
            icon_names,
            force_overwrite,
        } => {
            batch::gen_png(&toolbox, &catalog, &icon_names, force_overwrite)?;
        }
        Command::RemoveOutdatedPng => {
            batch::remove_outdated_png(&catalog)?;
        }
        Command::GenIco => {
            let out_dir = match &app_config.ico_output_dir {
                Some(dir) => root.join(dir),
                None => root.to_path_buf(),
            };
            let ico = batch::gen_app_ico(&toolbox, &catalog, &app_config.app_icon_name, &out_dir)?;
            println!("{}", ico.display());
        }
    }
    Ok(())
}
