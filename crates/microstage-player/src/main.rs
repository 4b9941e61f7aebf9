/// Microstage — fixed-canvas scene demo
///
/// Architecture:
///   assets/  — sprite sheet loading
///   engine/  — minifb window, frame loop, font, sound
///   game/    — menu bar, scenes, widgets

mod assets;
mod engine;
mod game;

use anyhow::{Context, Result};
use microstage_common::DemoConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SHEET_FILE: &str = "characters.png";
const CONFIG_FILE: &str = "microstage.toml";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("microstage_player=debug".parse()?),
        )
        .init();

    tracing::info!("Microstage v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    let sheet_path = find_sheet()?;

    let assets = assets::AssetStore::load(&sheet_path)
        .with_context(|| format!("Loading sprite sheet {}", sheet_path.display()))?;

    engine::run(assets, config)
}

/// Read microstage.toml from the working directory or next to the
/// executable; absent file means defaults.
fn load_config() -> Result<DemoConfig> {
    for dir in candidate_dirs() {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            return DemoConfig::load_or_default(&path)
                .with_context(|| format!("Reading {}", path.display()));
        }
    }
    Ok(DemoConfig::default())
}

fn candidate_dirs() -> Vec<PathBuf> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()));
    let mut dirs = vec![cwd];
    if let Some(dir) = exe_dir {
        dirs.push(dir);
    }
    dirs
}

/// Locate the sprite sheet. Priority:
/// 1. Command-line argument (the file itself, or a directory containing it)
/// 2. assets/ under the working directory or next to the executable
/// 3. The working directory or executable directory itself
fn find_sheet() -> Result<PathBuf> {
    if let Some(arg) = std::env::args().nth(1) {
        let path = PathBuf::from(&arg);
        if path.is_file() {
            return Ok(path);
        }
        if path.is_dir() {
            let candidate = path.join(SHEET_FILE);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
        tracing::warn!("Specified path not found: {}", arg);
    }

    for dir in candidate_dirs() {
        for candidate in [dir.join("assets").join(SHEET_FILE), dir.join(SHEET_FILE)] {
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }

    anyhow::bail!(
        "Sprite sheet not found!\n\n\
         Place {} in an assets/ folder next to the executable,\n\
         or pass its path as argument:  microstage <path-to-png-or-folder>",
        SHEET_FILE
    )
}
