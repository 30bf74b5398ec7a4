//! CLI argument parsing and configuration.

use std::io;
use std::path::PathBuf;

use super::prompts::{find_presets, prompt_preset_selection};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration from CLI arguments
pub struct CliConfig {
    pub preset: Option<PathBuf>,
    pub speed_ms: Option<u64>,
    pub stagger_ms: Option<u64>,
    pub seed: Option<u64>,
    pub out_dir: Option<PathBuf>,
    pub skip_prompts: bool,
}

/// Print usage information
pub fn print_usage() {
    eprintln!("StoryWeave TUI - Terminal story generator");
    eprintln!();
    eprintln!("Usage: storyweave-tui [preset.json] [OPTIONS]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [preset.json]     Story inputs preset to prefill the creator form");
    eprintln!("                    If omitted, presets/ is scanned for candidates");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --speed <MS>       Typewriter interval in milliseconds");
    eprintln!("  --stagger <MS>     Delay between segment entrances (default: 800)");
    eprintln!("  --seed <N>         Seed the story generator for reproducible output");
    eprintln!("  --out <DIR>        Export directory (default: downloads)");
    eprintln!("  -y, --yes          Skip preset selection prompts");
    eprintln!("  -h, --help         Show this help message");
    eprintln!("  -V, --version      Show version");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  storyweave-tui                      # Start with a blank form");
    eprintln!("  storyweave-tui presets/noir.json    # Prefill from a preset");
    eprintln!("  storyweave-tui --seed 7 --speed 10  # Fast, reproducible run");
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> io::Result<T> {
    let Some(raw) = args.get(i) else {
        print_usage();
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Missing value for {}", flag),
        ));
    };
    raw.parse().map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Invalid {} value: {}", flag, raw),
        )
    })
}

/// Parse CLI arguments and return configuration
pub fn parse_args() -> io::Result<CliConfig> {
    let args: Vec<String> = std::env::args().collect();
    let mut preset: Option<PathBuf> = None;
    let mut speed_ms: Option<u64> = None;
    let mut stagger_ms: Option<u64> = None;
    let mut seed: Option<u64> = None;
    let mut out_dir: Option<PathBuf> = None;
    let mut skip_prompts = false;

    let mut i = 1;
    while i < args.len() {
        let arg = &args[i];
        if arg == "-h" || arg == "--help" {
            print_usage();
            std::process::exit(0);
        } else if arg == "-V" || arg == "--version" {
            println!("storyweave-tui {}", VERSION);
            std::process::exit(0);
        } else if arg == "-y" || arg == "--yes" {
            skip_prompts = true;
            i += 1;
        } else if arg == "--speed" {
            i += 1;
            let value: u64 = parse_value(&args, i, "--speed")?;
            if value == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "--speed must be positive",
                ));
            }
            speed_ms = Some(value);
            i += 1;
        } else if arg == "--stagger" {
            i += 1;
            stagger_ms = Some(parse_value(&args, i, "--stagger")?);
            i += 1;
        } else if arg == "--seed" {
            i += 1;
            seed = Some(parse_value(&args, i, "--seed")?);
            i += 1;
        } else if arg == "--out" {
            i += 1;
            let Some(raw) = args.get(i) else {
                print_usage();
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "Missing value for --out",
                ));
            };
            out_dir = Some(PathBuf::from(raw));
            i += 1;
        } else if !arg.starts_with('-') {
            preset = Some(PathBuf::from(arg));
            i += 1;
        } else {
            print_usage();
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Unknown argument: {}", arg),
            ));
        }
    }

    // If no preset was given, offer the ones in presets/
    let preset = if let Some(path) = preset {
        Some(path)
    } else if skip_prompts {
        None
    } else {
        let presets = find_presets();
        if presets.is_empty() {
            None
        } else if presets.len() == 1 {
            println!("Found one preset: {}", presets[0].display());
            println!();
            Some(presets[0].clone())
        } else {
            Some(prompt_preset_selection(&presets)?)
        }
    };

    Ok(CliConfig {
        preset,
        speed_ms,
        stagger_ms,
        seed,
        out_dir,
        skip_prompts,
    })
}
