//! Gridedit - a three-column grid editor for the terminal

mod error;
mod logging;
mod tui;

use anyhow::Context;
use gridedit_core::{GridModel, storage};
use std::env;
use std::path::PathBuf;

fn print_usage() {
    eprintln!("Usage: gridedit [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    TSV file with initial rows (date, title, count)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <FILE>       Write the grid as TSV and exit (non-interactive)");
    eprintln!("  --keymap-file <path>      Load keybindings from TOML file");
    eprintln!("  --log-file <dir>          Write logs to this directory");
    eprintln!("  -h, --help                Print help");
}

struct Options {
    file_path: Option<PathBuf>,
    output_file: Option<PathBuf>,
    keymap_file: Option<PathBuf>,
    log_dir: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options {
        file_path: None,
        output_file: None,
        keymap_file: None,
        log_dir: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires a file path");
                    std::process::exit(1);
                }
                options.output_file = Some(PathBuf::from(&args[i]));
            }
            "--keymap-file" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --keymap-file requires a file path");
                    std::process::exit(1);
                }
                options.keymap_file = Some(PathBuf::from(&args[i]));
            }
            "--log-file" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --log-file requires a directory");
                    std::process::exit(1);
                }
                options.log_dir = Some(PathBuf::from(&args[i]));
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(1);
            }
            _ => {
                if options.file_path.is_none() {
                    options.file_path = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: Unexpected argument: {}", args[i]);
                    print_usage();
                    std::process::exit(1);
                }
            }
        }
        i += 1;
    }
    options
}

fn run(options: Options) -> anyhow::Result<()> {
    let grid = match &options.file_path {
        Some(path) => storage::read_tsv(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => GridModel::with_default_rows(),
    };

    if let Some(output_path) = options.output_file {
        storage::write_tsv(&output_path, &grid)
            .with_context(|| format!("failed to write {}", output_path.display()))?;
        println!("Exported to {}", output_path.display());
        return Ok(());
    }

    let (keymap, warnings) = tui::load_keymap(options.keymap_file.as_ref());
    for warning in &warnings {
        tracing::warn!("{}", warning);
        eprintln!("Warning: {}", warning);
    }

    let mut app = tui::App::new(grid, keymap);
    tui::run(&mut app).context("terminal error")?;
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args);
    logging::init(options.log_dir.clone(), options.output_file.is_some());

    if let Err(e) = run(options) {
        tracing::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
