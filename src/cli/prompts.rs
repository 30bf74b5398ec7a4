//! User prompt functions for interactive CLI input.

use std::io::{self, Write};
use std::path::PathBuf;

/// Find preset files (presets/*.json)
pub fn find_presets() -> Vec<PathBuf> {
    let presets_dir = PathBuf::from("presets");
    if !presets_dir.exists() {
        return Vec::new();
    }

    let mut presets = Vec::new();

    if let Ok(entries) = std::fs::read_dir(&presets_dir) {
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                presets.push(path);
            }
        }
    }

    presets.sort();
    presets
}

/// Get preset info for display
pub fn get_preset_info(path: &PathBuf) -> (String, String, usize) {
    let content = std::fs::read_to_string(path).unwrap_or_default();

    if let Ok(preset) = serde_json::from_str::<serde_json::Value>(&content) {
        let genre = preset
            .get("genre")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown genre")
            .to_string();

        let tone = preset
            .get("tone")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown tone")
            .to_string();

        let characters = preset
            .get("characters")
            .and_then(|v| v.as_array())
            .map(|arr| arr.len())
            .unwrap_or(0);

        (genre, tone, characters)
    } else {
        ("Unable to parse preset".to_string(), String::new(), 0)
    }
}

/// Display preset selection prompt and return selected preset
pub fn prompt_preset_selection(presets: &[PathBuf]) -> io::Result<PathBuf> {
    println!();
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║  StoryWeave TUI - Select a Preset                             ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Available presets:");
    println!();

    for (i, preset) in presets.iter().enumerate() {
        let (genre, tone, characters) = get_preset_info(preset);
        println!(
            "  {}) {:35} {} / {} ({} characters)",
            i + 1,
            preset.display().to_string(),
            genre,
            tone,
            characters
        );
    }

    println!();
    print!("Select preset [1-{}]: ", presets.len());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let selection: usize = input
        .trim()
        .parse()
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "Invalid selection"))?;

    if selection < 1 || selection > presets.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Selection out of range",
        ));
    }

    println!();
    println!("Selected: {}", presets[selection - 1].display());
    println!();

    Ok(presets[selection - 1].clone())
}
