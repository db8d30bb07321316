//! Palette command implementation

use std::process::ExitCode;

use serde::Serialize;

use crate::creature::Archetype;
use crate::palette::{select_palette, HueFamily, Palette};
use crate::seed::SeededRandom;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PaletteReport {
    seed: u32,
    family: HueFamily,
    archetype: Archetype,
    palette: Palette,
}

/// Execute the palette command
pub fn run_palette(description: &str, json: bool) -> ExitCode {
    if description.trim().is_empty() {
        eprintln!("Error: description must not be empty");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let rand = SeededRandom::from_description(description);
    let report = PaletteReport {
        seed: rand.seed(),
        family: HueFamily::detect(description),
        archetype: Archetype::from_seed(rand),
        palette: select_palette(description, rand.seed(), None),
    };

    if json {
        return match serde_json::to_string_pretty(&report) {
            Ok(s) => {
                println!("{}", s);
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                eprintln!("Error: Failed to serialize palette: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    println!("Seed:      {}", report.seed);
    println!("Family:    {:?}", report.family);
    println!("Archetype: {}", report.archetype);
    let names = ["main", "dark", "light", "accent", "outline"];
    for (name, css) in names.iter().zip(report.palette.themed_css()) {
        println!("  {:<8} {}", name, css);
    }
    ExitCode::from(EXIT_SUCCESS)
}
