//! Command-line interface for inspecting and normalizing keymaps
//!
//! Supports:
//! - Checking a keymap file record by record
//! - Rewriting a keymap in normalized form
//! - Listing the bindable action catalog
//! - Printing the built-in default keymap
//! - Writing starter config files and showing where they live

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::config::AppConfig;
use crate::config_paths;
use crate::keymap::{
    default_keymap_yaml, load_keymap, parse_keymap_yaml, try_load, ActionKind, FireMode, Keymap,
};

/// Time-warp keybinding manager
#[derive(Parser, Debug)]
#[command(name = "warpkeys", version, about = "Time-warp keybinding manager")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,

    /// Raise console log verbosity (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Validate every record of a keymap file
    Check {
        /// Keymap file (defaults to the user keymap)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Load a keymap over the defaults and print it back in normalized form
    Normalize {
        /// Keymap file (defaults to the user keymap)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },
    /// List every bindable action
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the built-in default keymap
    Defaults,
    /// Write the default config and keymap into the config directory
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
    /// Show config, keymap and log file locations
    Paths,
}

/// Result of `check`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub ok: usize,
    /// Loaded with an unassigned chord
    pub warnings: usize,
    pub dropped: usize,
}

impl CheckSummary {
    pub fn is_clean(&self) -> bool {
        self.warnings == 0 && self.dropped == 0
    }
}

/// One catalog row as printed by `list`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub action: &'static str,
    pub name: &'static str,
    pub fire_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_min: Option<f64>,
    /// None when unbounded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_default: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl CatalogEntry {
    pub fn for_kind(kind: ActionKind) -> Self {
        let spec = kind.value_spec();
        Self {
            action: kind.name(),
            name: kind.display_name(),
            fire_mode: match kind.fire_mode() {
                FireMode::Edge => "edge",
                FireMode::Level => "level",
            },
            value_min: spec.map(|s| s.min),
            value_max: spec.map(|s| s.max).filter(|max| max.is_finite()),
            value_default: spec.map(|s| s.default),
            field: kind.discriminator().map(|d| d.field()),
        }
    }
}

/// Whole catalog in declaration order
pub fn catalog() -> Vec<CatalogEntry> {
    ActionKind::iter().map(CatalogEntry::for_kind).collect()
}

/// Resolve an explicit path or fall back to the user keymap
pub fn keymap_path(file: Option<PathBuf>) -> Result<PathBuf> {
    match file {
        Some(path) => Ok(path),
        None => crate::config_paths::keymap_file().context("No config directory available"),
    }
}

/// Report every record of a keymap document
pub fn check(yaml: &str, out: &mut dyn Write) -> Result<CheckSummary> {
    let entries = parse_keymap_yaml(yaml).context("Not a keymap document")?;
    let mut summary = CheckSummary::default();

    for (index, entry) in entries.iter().enumerate() {
        let record = match entry {
            Ok(record) => record,
            Err(e) => {
                writeln!(out, "#{} dropped: {}", index, e)?;
                summary.dropped += 1;
                continue;
            }
        };

        match try_load(record) {
            Ok(loaded) => match loaded.chord_error {
                Some(e) => {
                    writeln!(out, "#{} {} unassigned: {}", index, record.action, e)?;
                    summary.warnings += 1;
                }
                None => {
                    writeln!(out, "#{} {} ok: {}", index, record.action, loaded.binding.description())?;
                    summary.ok += 1;
                }
            },
            Err(e) => {
                writeln!(out, "#{} dropped: {}", index, e)?;
                summary.dropped += 1;
            }
        }
    }

    writeln!(
        out,
        "{} ok, {} unassigned, {} dropped",
        summary.ok, summary.warnings, summary.dropped
    )?;
    Ok(summary)
}

/// Load a document over the defaults and serialize the resulting set
pub fn normalize(yaml: &str, config: &AppConfig) -> Result<String> {
    let mut keymap = Keymap::with_defaults(config.keymap_settings());
    keymap.load_yaml(yaml).context("Not a keymap document")?;
    Ok(keymap.to_yaml()?)
}

/// Write `config.yaml` and `keymap.yaml` into `dir`, keeping existing files
/// unless `force` is set
pub fn init_files(
    dir: &Path,
    config: &AppConfig,
    force: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let config_path = dir.join(config_paths::CONFIG_FILE);
    if force || !config_path.exists() {
        config.save_to(&config_path).map_err(anyhow::Error::msg)?;
        writeln!(out, "wrote {}", config_path.display())?;
    } else {
        writeln!(out, "kept {}", config_path.display())?;
    }

    let keymap_path = dir.join(config_paths::KEYMAP_FILE);
    if force || !keymap_path.exists() {
        std::fs::write(&keymap_path, default_keymap_yaml()?)
            .with_context(|| format!("Failed to write {}", keymap_path.display()))?;
        writeln!(out, "wrote {}", keymap_path.display())?;
    } else {
        writeln!(out, "kept {}", keymap_path.display())?;
    }
    Ok(())
}

/// Print the file locations used by the binary
pub fn paths(out: &mut dyn Write) -> Result<()> {
    let rows = [
        ("config", config_paths::config_file()),
        ("keymap", config_paths::keymap_file()),
        ("log", config_paths::log_file()),
    ];
    for (label, path) in rows {
        match path {
            Some(path) => writeln!(out, "{:<7}{}", label, path.display())?,
            None => writeln!(out, "{:<7}(no config directory)", label)?,
        }
    }
    Ok(())
}

/// Print the catalog as a table or JSON
pub fn list(json: bool, out: &mut dyn Write) -> Result<()> {
    let entries = catalog();
    if json {
        serde_json::to_writer_pretty(&mut *out, &entries)?;
        writeln!(out)?;
        return Ok(());
    }

    for entry in &entries {
        let range = match (entry.value_min, entry.value_max) {
            (Some(min), Some(max)) => format!("{}..={}", min, max),
            (Some(min), None) => format!("{}..", min),
            _ => String::new(),
        };
        writeln!(
            out,
            "{:<28} {:<5} {:<12} {:<10} {}",
            entry.action,
            entry.fire_mode,
            range,
            entry.field.unwrap_or(""),
            entry.name
        )?;
    }
    Ok(())
}

/// Execute a parsed command, writing output to `out`
///
/// Returns false when `check` found problems.
pub fn run(command: CliCommand, config: &AppConfig, out: &mut dyn Write) -> Result<bool> {
    match command {
        CliCommand::Check { file } => {
            let path = keymap_path(file)?;
            let yaml = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let summary = check(&yaml, out)?;
            Ok(summary.is_clean())
        }
        CliCommand::Normalize { file, output } => {
            let normalized = match file {
                Some(path) => {
                    let yaml = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    normalize(&yaml, config)?
                }
                // a missing user keymap normalizes to the defaults
                None => load_keymap(config.keymap_settings(), &keymap_path(None)?).to_yaml()?,
            };
            match output {
                Some(target) => std::fs::write(&target, normalized)
                    .with_context(|| format!("Failed to write {}", target.display()))?,
                None => out.write_all(normalized.as_bytes())?,
            }
            Ok(true)
        }
        CliCommand::List { json } => {
            list(json, out)?;
            Ok(true)
        }
        CliCommand::Defaults => {
            out.write_all(default_keymap_yaml()?.as_bytes())?;
            Ok(true)
        }
        CliCommand::Init { force } => {
            let dir = config_paths::ensure_config_dir().map_err(anyhow::Error::msg)?;
            init_files(&dir, config, force, out)?;
            Ok(true)
        }
        CliCommand::Paths => {
            paths(out)?;
            Ok(true)
        }
    }
}
